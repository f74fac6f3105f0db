use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Single-threaded input pump for the desktop.
///
/// Each turn calls the handler once with `None` (the redraw tick), then with
/// every event the driver has queued. Pointer drags arrive in bursts, so the
/// queue is drained before the next redraw rather than one event per frame.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if handler(&mut self.driver, None)? == ControlFlow::Quit {
                return Ok(());
            }
            if !self.driver.poll(self.poll_interval)? {
                continue;
            }
            loop {
                let event = self.driver.read()?;
                if handler(&mut self.driver, Some(event))? == ControlFlow::Quit {
                    return Ok(());
                }
                if !self.driver.poll(Duration::ZERO)? {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[derive(Default)]
    struct Scripted {
        events: VecDeque<Event>,
    }

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.events.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.events
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn queued_events_drain_between_ticks() {
        let driver = Scripted {
            events: [key('a'), key('b'), key('q')].into_iter().collect(),
        };
        let mut seen = Vec::new();
        let mut ticks = 0;
        EventLoop::new(driver, Duration::ZERO)
            .run(|_, event| {
                match event {
                    None => ticks += 1,
                    Some(Event::Key(k)) if k.code == KeyCode::Char('q') => {
                        return Ok(ControlFlow::Quit);
                    }
                    Some(event) => seen.push(event),
                }
                Ok(ControlFlow::Continue)
            })
            .unwrap();
        assert_eq!(seen, vec![key('a'), key('b')]);
        assert_eq!(ticks, 1);
    }

    #[test]
    fn driver_errors_stop_the_loop() {
        struct Broken;
        impl InputDriver for Broken {
            fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
                Ok(true)
            }
            fn read(&mut self) -> io::Result<Event> {
                Err(io::Error::other("gone"))
            }
        }
        let result = EventLoop::new(Broken, Duration::ZERO).run(|_, _| Ok(ControlFlow::Continue));
        assert!(result.is_err());
    }
}
