//! Serial console task
//!
//! Reads command lines from UART0 and answers on the same port.
//! Commands that change the lights are forwarded to the controller.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use ligght_core::state::Event;
use ligght_protocol::{version_info, CommandError, CommandReader, ConsoleCommand, HELP_TEXT};

use crate::channels::{current_mode, EVENT_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Console task - parses commands and writes replies
#[embassy_executor::task]
pub async fn console_task(mut tx: BufferedUartTx, mut rx: BufferedUartRx) {
    info!("Console task started");

    let mut reader = CommandReader::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };

        for &byte in &buf[..n] {
            match reader.feed(byte) {
                Some(Ok(command)) => handle_command(&mut tx, command).await,
                Some(Err(e)) => {
                    warn!("Console error: {:?}", e);
                    reply(&mut tx, error_text(e)).await;
                }
                None => {}
            }
        }
    }
}

/// Execute one parsed command
async fn handle_command(tx: &mut BufferedUartTx, command: ConsoleCommand) {
    debug!("Console command: {:?}", command);

    match command {
        ConsoleCommand::Help => reply(tx, HELP_TEXT).await,
        ConsoleCommand::Version => reply(tx, &version_info()).await,
        _ => {
            let Some(event) = command.to_event() else {
                return;
            };
            if matches!(event, Event::ForceTransition { .. })
                && !current_mode().accepts_forced_transitions()
            {
                reply(tx, "Error: requires debug mode\n").await;
                return;
            }
            // Commands are rare; wait rather than drop
            EVENT_CHANNEL.send(event).await;
        }
    }
}

fn error_text(error: CommandError) -> &'static str {
    match error {
        CommandError::Empty => "Error: empty command\n",
        CommandError::UnknownCommand => "Error: unknown command, try \"help\"\n",
        CommandError::MissingArgument => "Error: missing argument\n",
        CommandError::InvalidArgument => "Error: invalid argument\n",
        CommandError::TrailingArguments => "Error: too many arguments\n",
        CommandError::LineTooLong => "Error: line too long\n",
        CommandError::InvalidEncoding => "Error: invalid characters\n",
    }
}

async fn reply(tx: &mut BufferedUartTx, text: &str) {
    if let Err(e) = tx.write_all(text.as_bytes()).await {
        warn!("UART write error: {:?}", e);
    }
}
