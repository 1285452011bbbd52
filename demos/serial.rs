use std::env;

use inquire::Select;
use log::info;
use serialport::SerialPort;
use trumpf_pfg600::{
    config::{Parity, PortSettings},
    driver::Pfg600,
    register::{RegulationMode, State},
};

// Configuration constants - adjust these for your setup
const TARGET_POWER_W: u16 = 100;
const STABILIZATION_DELAY_MS: u64 = 1000;

pub struct PortWrapper(Box<dyn SerialPort>);

#[derive(Debug)]
pub struct IoError(std::io::Error);

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl embedded_io::Error for IoError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self.0.kind() {
            std::io::ErrorKind::NotFound => embedded_io::ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => embedded_io::ErrorKind::PermissionDenied,
            std::io::ErrorKind::BrokenPipe => embedded_io::ErrorKind::BrokenPipe,
            std::io::ErrorKind::InvalidInput => embedded_io::ErrorKind::InvalidInput,
            std::io::ErrorKind::InvalidData => embedded_io::ErrorKind::InvalidData,
            // serialport reports an elapsed read timeout as TimedOut.
            std::io::ErrorKind::TimedOut => embedded_io::ErrorKind::TimedOut,
            std::io::ErrorKind::Interrupted => embedded_io::ErrorKind::Interrupted,
            std::io::ErrorKind::Unsupported => embedded_io::ErrorKind::Unsupported,
            std::io::ErrorKind::OutOfMemory => embedded_io::ErrorKind::OutOfMemory,
            _ => embedded_io::ErrorKind::Other,
        }
    }
}

impl embedded_io::ErrorType for PortWrapper {
    type Error = IoError;
}

impl embedded_io::Read for PortWrapper {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        std::io::Read::read(&mut self.0, buf).map_err(IoError)
    }
}

impl embedded_io::Write for PortWrapper {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        std::io::Write::write(&mut self.0, buf).map_err(IoError)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        std::io::Write::flush(&mut self.0).map_err(IoError)
    }
}

fn open_port(port_name: &str, settings: &PortSettings) -> serialport::Result<Box<dyn SerialPort>> {
    let data_bits = match settings.data_bits {
        5 => serialport::DataBits::Five,
        6 => serialport::DataBits::Six,
        7 => serialport::DataBits::Seven,
        _ => serialport::DataBits::Eight,
    };
    let parity = match settings.parity {
        Parity::None => serialport::Parity::None,
        Parity::Odd => serialport::Parity::Odd,
        Parity::Even => serialport::Parity::Even,
    };
    let stop_bits = match settings.stop_bits {
        2 => serialport::StopBits::Two,
        _ => serialport::StopBits::One,
    };

    serialport::new(port_name, settings.baud_rate)
        .data_bits(data_bits)
        .parity(parity)
        .stop_bits(stop_bits)
        .timeout(std::time::Duration::from_millis(
            settings.timeout.to_millis() as u64,
        ))
        .open()
}

fn main() {
    env_logger::init();

    // Get serial port from command line arg or interactive selection
    let port_name = env::args().nth(1).unwrap_or_else(|| {
        let ports = serialport::available_ports().expect("Failed to enumerate serial ports");

        if ports.is_empty() {
            eprintln!("No serial ports found!");
            std::process::exit(1);
        }

        let port_names: Vec<String> = ports.iter().map(|p| p.port_name.clone()).collect();

        Select::new("Select a serial port:", port_names)
            .prompt()
            .expect("Failed to select port")
    });

    let settings = PortSettings::default();
    info!("Using port {} with {:?}", port_name, settings);

    let port = open_port(&port_name, &settings).expect("Failed to open serial port");
    let mut pfg = Pfg600::with_settings(PortWrapper(port), &settings);

    // Drop anything left over from a previous session.
    pfg.clear().expect("Failed to clear serial line");

    let errors = pfg.get_errors().unwrap();
    println!("Error flags: 0x{:04X}", errors);

    pfg.set_regulation(RegulationMode::Power).unwrap();
    println!("Regulating on {:?}", pfg.get_regulation().unwrap());

    pfg.set_target_power(TARGET_POWER_W).unwrap();
    println!("Target power: {}W", pfg.get_target_power().unwrap());

    pfg.set_operating_status(State::On).unwrap();
    println!("Output enabled");

    std::thread::sleep(std::time::Duration::from_millis(STABILIZATION_DELAY_MS));

    println!("Forward power: {}W", pfg.get_actual_power().unwrap());
    println!("Reflected power: {}W", pfg.get_actual_power_backward().unwrap());
    println!("Voltage: {}V", pfg.get_actual_voltage().unwrap());

    pfg.set_operating_status(false).unwrap();
    println!("Output disabled");
}
