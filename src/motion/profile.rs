//! Tick-based motion profile.
//!
//! Each tick turns the position error into a bounded acceleration, integrates
//! it into a bounded velocity and then into a fractional step accumulator.
//! Whole steps leave the accumulator as a [`StepCommand`].

use crate::config::units::{StepsPerSec, StepsPerSecSquared};

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Positive step count.
    Forward,
    /// Negative step count.
    Reverse,
}

impl Direction {
    /// Get direction from signed step count.
    #[inline]
    pub fn from_steps(steps: i32) -> Self {
        if steps >= 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// Saturation limits and tick period of the profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionLimits {
    /// Maximum velocity in steps/sec.
    pub max_velocity: f32,
    /// Maximum acceleration in steps/sec².
    pub max_acceleration: f32,
    /// Tick period in seconds.
    pub period: f32,
}

impl MotionLimits {
    /// Create limits from unit types and a period in seconds.
    pub fn new(
        max_velocity: StepsPerSec,
        max_acceleration: StepsPerSecSquared,
        period: f32,
    ) -> Self {
        Self {
            max_velocity: max_velocity.value(),
            max_acceleration: max_acceleration.value(),
            period,
        }
    }

    /// Positive, finite limits and period.
    ///
    /// A zero period turns the planned acceleration into NaN, which then
    /// sticks in the integrator.
    pub fn is_valid(&self) -> bool {
        let positive = |x: f32| x.is_finite() && x > 0.0;
        positive(self.max_velocity) && positive(self.max_acceleration) && positive(self.period)
    }
}

/// Integrator state owned by the control tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionState {
    /// Open-loop position in steps.
    pub position: i32,
    /// Current velocity in steps/sec.
    pub velocity: f32,
    /// Fractional step remainder, always within (-1, 1).
    pub accumulator: f32,
}

/// Output of one planning step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepCommand {
    /// Signed whole steps to emit this tick.
    pub steps: i32,
    /// Step rate to emit them at (`|velocity|`).
    pub frequency_hz: f32,
    /// Velocity after this tick.
    pub velocity: f32,
    /// Acceleration applied this tick (after saturation).
    pub acceleration: f32,
}

impl StepCommand {
    /// No steps to emit.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.steps == 0
    }

    /// Direction of the emitted steps.
    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::from_steps(self.steps)
    }
}

/// Discrete-time profile generator.
///
/// The acceleration requested each tick is the one that would null the
/// position error within a single period, then saturated:
///
/// ```text
/// a = clamp((e - v·T) / T², ±A)
/// v = clamp(v + a·T, ±V)
/// ```
#[derive(Debug, Clone)]
pub struct ProfileGenerator {
    limits: MotionLimits,
    state: MotionState,
}

impl ProfileGenerator {
    /// Create a generator at rest at position 0.
    pub fn new(limits: MotionLimits) -> Self {
        Self::at(limits, 0)
    }

    /// Create a generator at rest at the given position.
    ///
    /// `limits` must satisfy [`MotionLimits::is_valid`]; configurations that
    /// pass `validate_config` always do.
    pub fn at(limits: MotionLimits, position: i32) -> Self {
        debug_assert!(limits.is_valid(), "invalid motion limits: {:?}", limits);
        Self {
            limits,
            state: MotionState {
                position,
                ..MotionState::default()
            },
        }
    }

    /// Active limits.
    #[inline]
    pub fn limits(&self) -> &MotionLimits {
        &self.limits
    }

    /// Current integrator state.
    #[inline]
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Current position in steps.
    #[inline]
    pub fn position(&self) -> i32 {
        self.state.position
    }

    /// Current velocity in steps/sec.
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.state.velocity
    }

    /// Compute this tick's acceleration, velocity and whole-step count.
    ///
    /// Updates velocity and the accumulator. Position only moves on
    /// [`commit`](Self::commit).
    pub fn plan(&mut self, setpoint: i32) -> StepCommand {
        let MotionLimits {
            max_velocity,
            max_acceleration,
            period,
        } = self.limits;

        let error = (setpoint as i64 - self.state.position as i64) as f32;

        let desired = (error - self.state.velocity * period) / (period * period);
        let acceleration = desired.clamp(-max_acceleration, max_acceleration);

        let velocity =
            (self.state.velocity + acceleration * period).clamp(-max_velocity, max_velocity);
        self.state.velocity = velocity;

        self.state.accumulator += velocity * period;
        let steps = self.state.accumulator as i32;
        self.state.accumulator -= steps as f32;

        StepCommand {
            steps,
            frequency_hz: libm::fabsf(velocity),
            velocity,
            acceleration,
        }
    }

    /// Advance the position by the steps that were actually emitted.
    #[inline]
    pub fn commit(&mut self, emitted: i32) {
        self.state.position = self.state.position.wrapping_add(emitted);
    }

    /// Drop velocity and the fractional remainder. Position is kept.
    pub fn halt(&mut self) {
        self.state.velocity = 0.0;
        self.state.accumulator = 0.0;
    }

    /// Redefine the current position without moving.
    pub fn set_position(&mut self, position: i32) {
        self.state.position = position;
        self.halt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(v: f32, a: f32, t: f32) -> MotionLimits {
        MotionLimits {
            max_velocity: v,
            max_acceleration: a,
            period: t,
        }
    }

    fn run(generator: &mut ProfileGenerator, setpoint: i32, ticks: usize) -> i64 {
        let mut total = 0i64;
        for _ in 0..ticks {
            let cmd = generator.plan(setpoint);
            generator.commit(cmd.steps);
            total += cmd.steps as i64;
        }
        total
    }

    #[test]
    fn test_direction() {
        assert_eq!(Direction::from_steps(100), Direction::Forward);
        assert_eq!(Direction::from_steps(0), Direction::Forward);
        assert_eq!(Direction::from_steps(-100), Direction::Reverse);
        assert_eq!(Direction::Reverse.sign(), -1);
        assert_eq!(Direction::Forward.reversed(), Direction::Reverse);
    }

    #[test]
    fn test_limits_validity() {
        assert!(limits(10_000.0, 100_000.0, 0.01).is_valid());
        assert!(!limits(10_000.0, 100_000.0, 0.0).is_valid());
        assert!(!limits(0.0, 100_000.0, 0.01).is_valid());
        assert!(!limits(10_000.0, f32::NAN, 0.01).is_valid());
        assert!(!limits(f32::INFINITY, 100_000.0, 0.01).is_valid());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid motion limits")]
    fn test_zero_period_is_rejected() {
        let _ = ProfileGenerator::new(limits(10_000.0, 100_000.0, 0.0));
    }

    #[test]
    fn test_at_rest_on_setpoint_is_idle() {
        let mut generator = ProfileGenerator::at(limits(10_000.0, 100_000.0, 0.01), 42);
        let cmd = generator.plan(42);
        assert!(cmd.is_idle());
        assert_eq!(cmd.velocity, 0.0);
        assert_eq!(cmd.acceleration, 0.0);
    }

    #[test]
    fn test_generous_limits_reach_setpoint_in_one_tick() {
        for &target in &[500, 1000, -777] {
            let mut generator = ProfileGenerator::new(limits(1e9, 1e9, 0.01));
            let first = generator.plan(target);
            generator.commit(first.steps);
            assert_eq!(generator.position(), target);

            let second = generator.plan(target);
            generator.commit(second.steps);
            assert_eq!(second.steps, 0);
            assert_eq!(generator.velocity(), 0.0);
        }
    }

    #[test]
    fn test_first_tick_saturates_acceleration() {
        let mut generator = ProfileGenerator::new(limits(10_000.0, 100_000.0, 0.01));
        let cmd = generator.plan(1000);
        assert_eq!(cmd.acceleration, 100_000.0);
        assert_eq!(cmd.steps, 10);
        assert!((cmd.frequency_hz - 1000.0).abs() < 1e-2);
    }

    #[test]
    fn test_velocity_never_exceeds_limit() {
        let mut generator = ProfileGenerator::new(limits(10_000.0, 100_000.0, 0.01));
        for _ in 0..300 {
            let cmd = generator.plan(1000);
            generator.commit(cmd.steps);
            assert!(cmd.velocity.abs() <= 10_000.0);
            assert!(cmd.acceleration.abs() <= 100_000.0);
        }
    }

    #[test]
    fn test_reverse_move_settles() {
        let mut generator = ProfileGenerator::new(limits(10_000.0, 100_000.0, 0.01));
        let total = run(&mut generator, -1000, 300);
        assert_eq!(total, -1000);
        assert_eq!(generator.position(), -1000);
        assert_eq!(generator.velocity(), 0.0);
    }

    #[test]
    fn test_accumulator_stays_below_one_step() {
        let mut generator = ProfileGenerator::new(limits(333.3, 2_000.0, 0.007));
        for _ in 0..500 {
            let cmd = generator.plan(250);
            generator.commit(cmd.steps);
            assert!(generator.state().accumulator.abs() < 1.0);
        }
    }

    #[test]
    fn test_halt_keeps_position() {
        let mut generator = ProfileGenerator::new(limits(10_000.0, 100_000.0, 0.01));
        run(&mut generator, 1000, 5);
        let position = generator.position();
        generator.halt();
        assert_eq!(generator.position(), position);
        assert_eq!(generator.velocity(), 0.0);
        assert_eq!(generator.state().accumulator, 0.0);
    }
}
