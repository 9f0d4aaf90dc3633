use std::io::BufRead;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::action::Action;

#[derive(Clone, Debug)]
pub enum Event {
    Tick,
    Input(Action),
    Interrupt,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, read_stdin: bool) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        if read_stdin {
            spawn_stdin_reader(tx.clone());
        }

        let task = tokio::spawn(async move {
            let mut tick_interval = tokio::time::interval(tick_rate);
            tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let ctrl_c = tokio::signal::ctrl_c();
            tokio::pin!(ctrl_c);
            let mut ctrl_c_armed = true;

            loop {
                tokio::select! {
                    _ = tick_interval.tick() => {
                        if tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    result = &mut ctrl_c, if ctrl_c_armed => {
                        match result {
                            Ok(()) => {
                                let _ = tx.send(Event::Interrupt);
                                break;
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "cannot listen for Ctrl-C");
                                ctrl_c_armed = false;
                            }
                        }
                    }
                }
            }
        });

        Self { rx, _task: task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Blocking line reader on its own thread. It cannot be interrupted while
/// waiting on stdin, so it is left to exit with the process.
fn spawn_stdin_reader(tx: mpsc::UnboundedSender<Event>) {
    let spawned = std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                let action = Action::parse(&line);
                if action == Action::None {
                    continue;
                }
                if tx.send(Event::Input(action)).is_err() {
                    break;
                }
            }
            tracing::debug!("stdin closed");
        });
    if let Err(err) = spawned {
        tracing::warn!(error = %err, "interactive commands disabled");
    }
}
