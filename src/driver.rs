use crate::{
    config::PortSettings,
    error::{Error, Result},
    message::Message,
    protocol::Pfg600Protocol,
    register::{
        LimitMode, MAX_TARGET_POWER, MAX_TARGET_VOLTAGE, Pfg600Register, RegulationMode, State,
    },
};

/// You can create a Pfg600 using any interface which implements [embedded_io::Read] & [embedded_io::Write].
///
/// For it's methods, "set" writes a setpoint or configuration, "get" reads one back. Measured
/// values are read with the `get_actual_*` methods.
pub struct Pfg600<S: embedded_io::Read + embedded_io::Write> {
    interface: S,
    protocol: Pfg600Protocol,
}

impl<S: embedded_io::Read + embedded_io::Write> Pfg600<S> {
    /// Create a new Pfg600 instance with the given interface and device address.
    pub fn new(interface: S, address: u8) -> Self {
        Self {
            interface,
            protocol: Pfg600Protocol::new(address),
        }
    }

    /// Create a new Pfg600 for the device address in `settings`.
    pub fn with_settings(interface: S, settings: &PortSettings) -> Self {
        Self::new(interface, settings.address)
    }

    /// Give back the underlying interface.
    pub fn release(self) -> S {
        self.interface
    }

    /// Discard anything still buffered on the line.
    pub fn clear(&mut self) -> Result<(), S::Error> {
        self.protocol.clear(&mut self.interface)
    }

    /// Return the target power in watts.
    pub fn get_target_power(&mut self) -> Result<u16, S::Error> {
        self.query_raw(Pfg600Register::TargetPower)
    }

    /// Set the target power in watts, 0-1000.
    pub fn set_target_power(&mut self, power: u16) -> Result<(), S::Error> {
        if power > MAX_TARGET_POWER {
            return Err(Error::InvalidRange);
        }
        self.write_raw(Pfg600Register::TargetPower, power)
    }

    /// Return the target voltage in volts.
    pub fn get_target_voltage(&mut self) -> Result<u16, S::Error> {
        self.query_raw(Pfg600Register::TargetVoltage)
    }

    /// Set the target voltage in volts, 0-1000.
    pub fn set_target_voltage(&mut self, voltage: u16) -> Result<(), S::Error> {
        if voltage > MAX_TARGET_VOLTAGE {
            return Err(Error::InvalidRange);
        }
        self.write_raw(Pfg600Register::TargetVoltage, voltage)
    }

    /// Return the raw error flags.
    pub fn get_errors(&mut self) -> Result<u16, S::Error> {
        self.query_raw(Pfg600Register::Error)
    }

    pub fn get_regulation(&mut self) -> Result<RegulationMode, S::Error> {
        let value = self.query_raw(Pfg600Register::Regulate)?;
        RegulationMode::try_from(value).map_err(Error::UnknownValue)
    }

    pub fn set_regulation(&mut self, mode: RegulationMode) -> Result<(), S::Error> {
        self.write_raw(Pfg600Register::Regulate, mode)
    }

    /// Return the raw operating mode.
    pub fn get_operating_mode(&mut self) -> Result<u16, S::Error> {
        self.query_raw(Pfg600Register::OperatingMode)
    }

    pub fn get_operating_status(&mut self) -> Result<State, S::Error> {
        let value = self.query_raw(Pfg600Register::OperatingStatus)?;
        State::try_from(value).map_err(Error::UnknownValue)
    }

    /// Switch the RF output on or off.
    pub fn set_operating_status(&mut self, state: impl Into<State>) -> Result<(), S::Error> {
        self.write_raw(Pfg600Register::OperatingStatus, state.into())
    }

    /// Return the measured forward power in watts.
    pub fn get_actual_power(&mut self) -> Result<u16, S::Error> {
        self.query_raw(Pfg600Register::ActualPower)
    }

    /// Return the measured voltage in volts.
    pub fn get_actual_voltage(&mut self) -> Result<u16, S::Error> {
        self.query_raw(Pfg600Register::ActualVoltage)
    }

    /// Return the measured reflected power in watts.
    pub fn get_actual_power_backward(&mut self) -> Result<u16, S::Error> {
        self.query_raw(Pfg600Register::ActualPowerBackward)
    }

    pub fn get_limit(&mut self) -> Result<LimitMode, S::Error> {
        let value = self.query_raw(Pfg600Register::Limit)?;
        LimitMode::try_from(value).map_err(Error::UnknownValue)
    }

    pub fn set_limit(&mut self, limit: LimitMode) -> Result<(), S::Error> {
        self.write_raw(Pfg600Register::Limit, limit)
    }

    /// Reset the generator.
    pub fn reset(&mut self) -> Result<(), S::Error> {
        self.write_raw(Pfg600Register::Reset, 0u16)
    }

    /// Query any register and return the data of the reply.
    pub fn query_raw(&mut self, register: impl Into<u8>) -> Result<u16, S::Error> {
        let request = self.request(register.into(), 0);
        let response = self.protocol.query(&mut self.interface, request)?;
        Ok(response.data())
    }

    /// Write `data` to any register.
    pub fn write_raw(
        &mut self,
        register: impl Into<u8>,
        data: impl Into<u16>,
    ) -> Result<(), S::Error> {
        let request = self.request(register.into(), data.into());
        self.protocol.write(&mut self.interface, request)
    }

    fn request(&self, function_code: u8, data: u16) -> Message {
        self.protocol.message(function_code, data)
    }
}
