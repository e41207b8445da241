use std::time::Duration;

use anyhow::Context;
use log::{debug, info};
use receiver::{CaptureBank, ChannelSource, RcReceiver, ReceiverConfig};

use board::SimBoard;
use radio::PpmRadio;

mod board;
mod radio;

static CAPTURE: CaptureBank = CaptureBank::new();

enum State {
    Initializing,
    Running { phase: usize, tick: u32 },
    Stopping,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ReceiverConfig::default();
    let board = SimBoard::new(&CAPTURE);
    let mut rc = RcReceiver::new(config, &CAPTURE, board.interrupts()).context("failed to bring up the receiver")?;
    let radio = PpmRadio::new(config.pins);
    let scenario = radio::default_scenario();

    let mut ticker = tokio::time::interval(Duration::from_micros(u64::from(radio::FRAME_US)));
    let mut state = State::Initializing;
    loop {
        match state {
            State::Initializing => {
                info!(
                    "SITL receiver: override {}, thrust {}, rudder {}",
                    config.pins.override_pin, config.pins.thrust, config.pins.rudder
                );
                state = State::Running { phase: 0, tick: 0 };
            }
            State::Running { phase, tick } => {
                let Some(current) = scenario.get(phase) else {
                    state = State::Stopping;
                    continue;
                };
                if tick == 0 {
                    info!("phase: {}", current.name);
                }

                ticker.tick().await;
                radio.transmit(&board, &current.frame(tick));
                let outcome = rc.update();

                // Autonomy stack runs after the receiver each tick
                match current.autonomy_velocity {
                    Some(velocity) => {
                        rc.set_control_state(true);
                        rc.set_control_velocity(velocity);
                    }
                    None => rc.set_control_state(false),
                }

                let mix = rc.mix();
                debug!("tick {} {:?} {:?}", tick, outcome, mix);

                state = if tick + 1 >= current.ticks {
                    info!(
                        "{:?}, override {}, thrust {:.2}, rudder {:.2} -> right {:.3}, left {:.3}, fans {:.2}/{:.2}",
                        outcome,
                        if rc.override_enabled() { "on" } else { "off" },
                        rc.values().thrust,
                        rc.values().rudder,
                        mix.right_velocity,
                        mix.left_velocity,
                        mix.right_fan,
                        mix.left_fan,
                    );
                    State::Running { phase: phase + 1, tick: 0 }
                } else {
                    State::Running { phase, tick: tick + 1 }
                };
            }
            State::Stopping => {
                info!("stopping after {} capture interrupts", board.dispatched());
                break;
            }
        }
    }
    Ok(())
}
