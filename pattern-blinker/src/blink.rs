//! the blink loop: pattern display and button handling

use core::convert::Infallible;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use pattern_blinker_board::Level;

//==========================================================

/// compile time settings of the blink loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkConfig {
    /// pattern shown after reset, one bit per step
    pub initial_pattern: u8,
    /// delay at the end of each step
    pub speed_ms: u16,
    /// settle time before a LOW button read is confirmed
    pub debounce_ms: u16,
    /// poll interval while waiting for the button to be released
    pub release_poll_ms: u16,
}

impl BlinkConfig {
    pub const DEFAULT: BlinkConfig = BlinkConfig {
        initial_pattern: 0b1010_1010,
        speed_ms: 100,
        debounce_ms: 20,
        release_poll_ms: 10,
    };
}

impl Default for BlinkConfig {
    fn default() -> Self {
        BlinkConfig::DEFAULT
    }
}

//==========================================================

/// Button is active low.  A LOW read counts as a press only if the button
/// still reads LOW after `debounce_ms`.
pub fn is_button_pressed<B, D>(button: &B, delay: &mut D, debounce_ms: u16) -> Result<bool, B::Error>
where
    B: InputPin,
    D: DelayMs<u16>,
{
    if button.is_low()? {
        delay.delay_ms(debounce_ms);
        return button.is_low();
    }
    Ok(false)
}

/// block until the button reads HIGH, polling every `poll_ms`
pub fn wait_for_release<B, D>(button: &B, delay: &mut D, poll_ms: u16) -> Result<(), B::Error>
where
    B: InputPin,
    D: DelayMs<u16>,
{
    while button.is_low()? {
        delay.delay_ms(poll_ms);
    }
    Ok(())
}

//==========================================================

/// what one step of the loop did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// a confirmed press inverted the pattern during this step
    pub pressed: bool,
    /// pattern bit that was displayed
    pub position: u8,
    /// level of the displayed bit, LED1 follows it and LED2 shows the opposite
    pub lit: Level,
    /// pattern after the step
    pub pattern: u8,
}

/// Owns the two LEDs, the button and the delay, plus the pattern state.
///
/// `position` is always in `0..8`.
pub struct Blinker<L1, L2, B, D> {
    led1: L1,
    led2: L2,
    button: B,
    delay: D,
    pattern: u8,
    position: u8,
    config: BlinkConfig,
}

impl<L1, L2, B, D> Blinker<L1, L2, B, D> {
    /// The pins must already be configured: LEDs as outputs, the button as
    /// input with pull-up.
    pub fn new(led1: L1, led2: L2, button: B, delay: D, config: BlinkConfig) -> Self {
        Blinker {
            led1,
            led2,
            button,
            delay,
            pattern: config.initial_pattern,
            position: 0,
            config,
        }
    }

    pub fn pattern(&self) -> u8 {
        self.pattern
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    /// give back the pins and the delay
    pub fn release(self) -> (L1, L2, B, D) {
        (self.led1, self.led2, self.button, self.delay)
    }
}

impl<L1, L2, B, D, E> Blinker<L1, L2, B, D>
where
    L1: OutputPin<Error = E>,
    L2: OutputPin<Error = E>,
    B: InputPin<Error = E>,
    D: DelayMs<u16>,
{
    /// one pass of the loop body
    pub fn step(&mut self) -> Result<Tick, E> {
        let pressed = is_button_pressed(&self.button, &mut self.delay, self.config.debounce_ms)?;
        if pressed {
            self.pattern = !self.pattern;
            wait_for_release(&self.button, &mut self.delay, self.config.release_poll_ms)?;
        }

        let position = self.position;
        let lit = Level::from(self.pattern & (1 << position) != 0);
        self.show(lit)?;

        self.position = (position + 1) % 8;
        self.delay.delay_ms(self.config.speed_ms);

        Ok(Tick {
            pressed,
            position,
            lit,
            pattern: self.pattern,
        })
    }

    /// LED1 shows `lit`, LED2 the opposite
    fn show(&mut self, lit: Level) -> Result<(), E> {
        match lit {
            Level::High => {
                self.led1.set_high()?;
                self.led2.set_low()
            }
            Level::Low => {
                self.led1.set_low()?;
                self.led2.set_high()
            }
        }
    }

    /// Step forever, handing every tick to `on_tick`.  Only returns when a
    /// pin reports an error.
    pub fn run<F>(&mut self, mut on_tick: F) -> Result<Infallible, E>
    where
        F: FnMut(&Tick),
    {
        loop {
            let tick = self.step()?;
            on_tick(&tick);
        }
    }
}

//==========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct PinFault;

    #[derive(Clone, Default)]
    struct Led {
        on: Rc<Cell<Option<bool>>>,
        broken: Rc<Cell<bool>>,
    }

    impl Led {
        fn is_on(&self) -> bool {
            self.on.get().expect("led never driven")
        }
    }

    impl OutputPin for Led {
        type Error = PinFault;

        fn set_high(&mut self) -> Result<(), PinFault> {
            if self.broken.get() {
                return Err(PinFault);
            }
            self.on.set(Some(true));
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), PinFault> {
            if self.broken.get() {
                return Err(PinFault);
            }
            self.on.set(Some(false));
            Ok(())
        }
    }

    /// Plays back scripted levels (`true` = HIGH), then stays HIGH.
    #[derive(Clone, Default)]
    struct Button {
        script: Rc<RefCell<VecDeque<bool>>>,
        reads: Rc<Cell<usize>>,
    }

    impl Button {
        fn queue(&self, levels: &[bool]) {
            self.script.borrow_mut().extend(levels.iter().copied());
        }

        fn remaining(&self) -> usize {
            self.script.borrow().len()
        }
    }

    impl InputPin for Button {
        type Error = PinFault;

        fn is_high(&self) -> Result<bool, PinFault> {
            self.reads.set(self.reads.get() + 1);
            Ok(self.script.borrow_mut().pop_front().unwrap_or(true))
        }

        fn is_low(&self) -> Result<bool, PinFault> {
            self.is_high().map(|high| !high)
        }
    }

    #[derive(Clone, Default)]
    struct Delay {
        calls: Rc<RefCell<Vec<u16>>>,
    }

    impl Delay {
        fn take(&self) -> Vec<u16> {
            self.calls.borrow_mut().drain(..).collect()
        }
    }

    impl DelayMs<u16> for Delay {
        fn delay_ms(&mut self, ms: u16) {
            self.calls.borrow_mut().push(ms);
        }
    }

    const LOW: bool = false;
    const HIGH: bool = true;

    struct Rig {
        led1: Led,
        led2: Led,
        button: Button,
        delay: Delay,
        blinker: Blinker<Led, Led, Button, Delay>,
    }

    fn rig(pattern: u8) -> Rig {
        let (led1, led2, button, delay) = (Led::default(), Led::default(), Button::default(), Delay::default());
        let config = BlinkConfig {
            initial_pattern: pattern,
            ..BlinkConfig::DEFAULT
        };
        let blinker = Blinker::new(led1.clone(), led2.clone(), button.clone(), delay.clone(), config);
        Rig {
            led1,
            led2,
            button,
            delay,
            blinker,
        }
    }

    #[test]
    fn default_config() {
        let config = BlinkConfig::default();
        assert_eq!(config.initial_pattern, 0b1010_1010);
        assert_eq!(config.speed_ms, 100);
        assert_eq!(config.debounce_ms, 20);
        assert_eq!(config.release_poll_ms, 10);
    }

    #[test]
    fn confirmed_press_inverts_pattern() {
        let mut r = rig(0b1010_1010);
        // pressed, still pressed after settling, released on first poll
        r.button.queue(&[LOW, LOW, HIGH]);
        let tick = r.blinker.step().unwrap();
        assert!(tick.pressed);
        assert_eq!(r.blinker.pattern(), 0b0101_0101);
        assert_eq!(tick.pattern, 0b0101_0101);

        r.button.queue(&[LOW, LOW, HIGH]);
        r.blinker.step().unwrap();
        assert_eq!(r.blinker.pattern(), 0b1010_1010);
    }

    #[test]
    fn press_waits_for_release_before_showing() {
        let mut r = rig(0b0000_0001);
        r.button.queue(&[LOW, LOW, LOW, LOW, LOW, HIGH]);
        let tick = r.blinker.step().unwrap();
        assert_eq!(r.button.remaining(), 0);
        assert_eq!(r.button.reads.get(), 6);
        // settle, three release polls, then the step delay
        assert_eq!(r.delay.take(), vec![20, 10, 10, 10, 100]);
        // bit 0 of the inverted pattern is clear
        assert_eq!(tick.lit, Level::Low);
        assert!(!r.led1.is_on());
        assert!(r.led2.is_on());
    }

    #[test]
    fn bounce_shorter_than_settle_time_is_ignored() {
        let mut r = rig(0b1010_1010);
        r.button.queue(&[LOW, HIGH]);
        let tick = r.blinker.step().unwrap();
        assert!(!tick.pressed);
        assert_eq!(r.blinker.pattern(), 0b1010_1010);
        assert_eq!(r.delay.take(), vec![20, 100]);
    }

    #[test]
    fn idle_button_costs_one_read_and_no_settle_delay() {
        let mut r = rig(0);
        r.blinker.step().unwrap();
        assert_eq!(r.button.reads.get(), 1);
        assert_eq!(r.delay.take(), vec![100]);
    }

    #[test]
    fn position_visits_every_bit_in_order() {
        let mut r = rig(0b1010_1010);
        assert_eq!(r.blinker.position(), 0);
        let visited: Vec<u8> = (0..8).map(|_| r.blinker.step().unwrap().position).collect();
        assert_eq!(visited, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(r.blinker.position(), 0);
        assert_eq!(r.blinker.pattern(), 0b1010_1010);
    }

    #[test]
    fn leds_are_always_complementary() {
        for pattern in 0..=u8::MAX {
            let mut r = rig(pattern);
            for position in 0..8u8 {
                let tick = r.blinker.step().unwrap();
                let bit = pattern & (1 << position) != 0;
                assert_eq!(tick.lit, Level::from(bit));
                assert_eq!(r.led1.is_on(), bit);
                assert_ne!(r.led1.is_on(), r.led2.is_on());
            }
        }
    }

    #[test]
    fn press_mid_cycle_keeps_position() {
        let mut r = rig(0b0000_1111);
        for _ in 0..3 {
            r.blinker.step().unwrap();
        }
        r.button.queue(&[LOW, LOW, HIGH]);
        let tick = r.blinker.step().unwrap();
        assert_eq!(tick.position, 3);
        // bit 3 was set, inverted pattern has it clear
        assert_eq!(tick.lit, Level::Low);
        assert_eq!(r.blinker.position(), 4);
    }

    #[test]
    fn button_helpers() {
        let button = Button::default();
        let mut delay = Delay::default();

        assert_eq!(is_button_pressed(&button, &mut delay, 20), Ok(false));
        assert!(delay.take().is_empty());

        button.queue(&[LOW, LOW]);
        assert_eq!(is_button_pressed(&button, &mut delay, 20), Ok(true));
        assert_eq!(delay.take(), vec![20]);

        button.queue(&[LOW, LOW, HIGH]);
        assert_eq!(wait_for_release(&button, &mut delay, 10), Ok(()));
        assert_eq!(delay.take(), vec![10, 10]);
    }

    #[test]
    fn run_reports_every_tick_until_a_pin_fails() {
        let r = rig(0b1111_0000);
        let led2 = r.led2.clone();
        let mut blinker = r.blinker;
        let mut seen = Vec::new();
        let outcome = blinker.run(|tick| {
            seen.push(tick.position);
            if seen.len() == 3 {
                led2.broken.set(true);
            }
        });
        // bit 3 is clear, so the fourth step drives LED2 high and fails
        assert!(matches!(outcome, Err(PinFault)));
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn run_returns_pin_error() {
        let led = Led::default();
        led.broken.set(true);
        let mut blinker = Blinker::new(led.clone(), led, Button::default(), Delay::default(), BlinkConfig::DEFAULT);
        let mut ticks = 0;
        let outcome = blinker.run(|_| ticks += 1);
        assert!(matches!(outcome, Err(PinFault)));
        assert_eq!(ticks, 0);
    }

    #[test]
    fn release_returns_parts() {
        let r = rig(0x3C);
        let (_led1, _led2, button, _delay) = r.blinker.release();
        assert_eq!(button.reads.get(), 0);
    }
}
