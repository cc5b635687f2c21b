//! Ligght - Daisy-chained traffic light firmware
//!
//! Firmware binary for RP2040-based traffic light controllers. The board
//! runs the light schedule and writes each new step to the LED boards
//! on its I2C chain. A serial console on UART0 switches modes and forces
//! states in debug mode.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ligght_core::bus::BusDispatcher;
use ligght_core::config::{parse_config, BoardConfig, DipSwitches, DIP_SWITCH_COUNT};
use ligght_core::program::Programs;
use ligght_core::sequencer::Sequencer;
use ligght_hal::{HalI2cBus, HalInputPin, InputPin};

mod channels;
mod tasks;

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../board.toml");

/// Mode button, active low
pub type ButtonPin = HalInputPin<Input<'static>>;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

// Program tables are borrowed by the sequencer for the program duration
static PROGRAMS: StaticCell<Programs> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Ligght firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    let programs = match Programs::builtin(config.time_scale()) {
        Ok(programs) => PROGRAMS.init(programs),
        Err(e) => {
            // Built-in tables only fail for an unusable time unit
            error!("Invalid program table: {:?}", e);
            defmt::panic!("program tables rejected");
        }
    };
    info!(
        "Program tables ready: cycle {} ms (simple), {} ms (junction)",
        programs.simple_light.cycle_length_ms(),
        programs.four_way_junction.cycle_length_ms()
    );

    // DIP switches pull the pin low when ON; read once at boot
    let mut dip_pins = [
        HalInputPin::new(Input::new(p.PIN_9, Pull::Up)),
        HalInputPin::new(Input::new(p.PIN_10, Pull::Up)),
        HalInputPin::new(Input::new(p.PIN_11, Pull::Up)),
        HalInputPin::new(Input::new(p.PIN_12, Pull::Up)),
    ];
    let mut on = [false; DIP_SWITCH_COUNT];
    for (slot, pin) in on.iter_mut().zip(dip_pins.iter_mut()) {
        *slot = pin.is_low();
    }
    let switches = DipSwitches::new(on);
    let roles = switches.roles();
    let chain = switches.chain(&config);
    info!(
        "DIP switches {:?}: simple={}, slave={}, {} boards",
        switches.on,
        roles.is_simple_traffic_light,
        roles.is_used_as_slave,
        chain.len()
    );

    let button: ButtonPin = HalInputPin::new(Input::new(p.PIN_14, Pull::Up));

    // I2C0 to the LED boards (SDA GPIO4, SCL GPIO5)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = config.i2c_frequency_hz;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let dispatcher = BusDispatcher::new(HalI2cBus::new(i2c));
    info!("I2C initialized at {} Hz", config.i2c_frequency_hz);

    // UART0 console, 115200 baud default
    let tx_buf = TX_BUF.init([0u8; 512]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = BufferedUart::new(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        Irqs,
        tx_buf,
        rx_buf,
        UartConfig::default(),
    );
    let (tx, rx) = uart.split();
    info!("UART initialized for console");

    let mut sequencer = Sequencer::new(programs, roles);
    sequencer.select_mode(config.start_mode);

    spawner.spawn(tasks::tick_task(config.tick_interval_ms)).unwrap();
    spawner.spawn(tasks::console_task(tx, rx)).unwrap();
    spawner.spawn(tasks::button_task(button)).unwrap();
    spawner
        .spawn(tasks::controller_task(sequencer, dispatcher, chain))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded board.toml
///
/// build.rs already validated the file, so a failure here means the
/// parser and the validator disagree. Defaults keep the lights running.
fn load_config() -> BoardConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            warn!("Failed to parse embedded config: {:?}", e);
            warn!("Using default board configuration");
            BoardConfig::default()
        }
    }
}
