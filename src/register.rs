//! This module is used to define the registers on the PFG 600 and the values they accept.

use strum_macros::EnumIter;

/// Function codes of the generator's registers.
///
/// The device manual lists some codes with bit 7 set (e.g. `0xDA`). Bit 7 of the function byte
/// is the waiting bit, so only the low 7 bits are the register and that is what we store here.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter)]
#[repr(u8)]
pub enum Pfg600Register {
    /// __R/W__ - Target output power.
    ///
    /// Value is in watts, 0-1000.
    TargetPower = 0x41,
    /// __R/W__ - Target output voltage.
    ///
    /// Value is in volts, 0-1000.
    TargetVoltage = 0x42,
    /// __R/W__ - Regulation mode.
    ///
    /// See [`RegulationMode`].
    Regulate = 0x4D,
    /// __R__ - Operating mode. Listed as `0xCE` in the manual.
    OperatingMode = 0x4E,
    /// __R/W__ - Operating status.
    /// * `0` - Off.
    /// * `1` - On.
    OperatingStatus = 0x4F,
    /// __W__ - Reset the generator.
    Reset = 0x50,
    /// __R__ - Measured forward power. Listed as `0xD1` in the manual.
    ActualPower = 0x51,
    /// __R__ - Measured voltage. Listed as `0xD2` in the manual.
    ActualVoltage = 0x52,
    /// __R__ - Measured reflected power. Listed as `0xD4` in the manual.
    ActualPowerBackward = 0x54,
    /// __R/W__ - Limiting parameter.
    ///
    /// See [`LimitMode`].
    Limit = 0x57,
    /// __R__ - Error flags. Listed as `0xDA` in the manual.
    Error = 0x5A,
}

impl From<Pfg600Register> for u8 {
    fn from(value: Pfg600Register) -> Self {
        value as u8
    }
}

/// Upper bound of the target power setpoint in watts.
pub const MAX_TARGET_POWER: u16 = 1000;
/// Upper bound of the target voltage setpoint in volts.
pub const MAX_TARGET_VOLTAGE: u16 = 1000;

/// Quantity the generator regulates its output on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter)]
#[repr(u16)]
pub enum RegulationMode {
    Power = 1,
    Voltage = 2,
    DeltaP = 3,
    RfPeak = 4,
}

impl From<RegulationMode> for u16 {
    fn from(value: RegulationMode) -> Self {
        value as u16
    }
}

impl TryFrom<u16> for RegulationMode {
    type Error = u16;
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Power),
            2 => Ok(Self::Voltage),
            3 => Ok(Self::DeltaP),
            4 => Ok(Self::RfPeak),
            other => Err(other),
        }
    }
}

/// Quantity the generator limits its output on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter)]
#[repr(u16)]
pub enum LimitMode {
    Power = 1,
    Voltage = 2,
    DeltaP = 3,
    RfPeak = 4,
}

impl From<LimitMode> for u16 {
    fn from(value: LimitMode) -> Self {
        value as u16
    }
}

impl TryFrom<u16> for LimitMode {
    type Error = u16;
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Power),
            2 => Ok(Self::Voltage),
            3 => Ok(Self::DeltaP),
            4 => Ok(Self::RfPeak),
            other => Err(other),
        }
    }
}

/// Used to be less ambiguous and whether something is on or off.
#[repr(u16)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter)]
pub enum State {
    /// Disabled.
    #[default]
    Off = 0x00,
    /// Enabled.
    On = 0x01,
}

impl From<State> for bool {
    fn from(value: State) -> Self {
        match value {
            State::Off => false,
            State::On => true,
        }
    }
}

impl From<bool> for State {
    fn from(value: bool) -> Self {
        match value {
            true => State::On,
            false => State::Off,
        }
    }
}

impl From<State> for u16 {
    fn from(value: State) -> Self {
        value as u16
    }
}

impl TryFrom<u16> for State {
    type Error = u16;
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Off),
            0x01 => Ok(Self::On),
            other => Err(other),
        }
    }
}
