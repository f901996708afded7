use crate::constants::*;
use flame_core::FlameDynamics;

/// What the blow gesture asks of the flame this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlowCommand {
    SetStrength(f32),
    StartRecovery,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlowPhase {
    Idle,
    Rising,
    Holding,
    Releasing,
}

/// Press-and-hold "blow" interaction, advanced by the frame loop.
///
/// While held, the requested strength eases in (quadratic) toward the max
/// slider over `BLOW_MAX_RAMP_SEC * (1 - speed)` seconds. On release it steps
/// down by the flame's recovery speed every `BLOW_RELEASE_STEP_SEC` and hands
/// over to `start_recovery` once it reaches zero.
#[derive(Clone, Debug)]
pub struct BlowGesture {
    phase: BlowPhase,
    current: f32,
    held_sec: f32,
    release_accum: f32,
}

impl Default for BlowGesture {
    fn default() -> Self {
        Self {
            phase: BlowPhase::Idle,
            current: 0.0,
            held_sec: 0.0,
            release_accum: 0.0,
        }
    }
}

#[inline]
pub fn ease_in_quad(t: f32) -> f32 {
    t * t
}

impl BlowGesture {
    pub fn phase(&self) -> BlowPhase {
        self.phase
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn is_held(&self) -> bool {
        matches!(self.phase, BlowPhase::Rising | BlowPhase::Holding)
    }

    pub fn press(&mut self) {
        if self.is_held() {
            return;
        }
        self.phase = BlowPhase::Rising;
        self.current = 0.0;
        self.held_sec = 0.0;
    }

    pub fn release(&mut self) {
        if self.is_held() {
            self.phase = BlowPhase::Releasing;
            self.release_accum = 0.0;
        }
    }

    /// Max slider moved; applies straight away while the button is held.
    pub fn set_max(&mut self, max_strength: f32) -> Option<BlowCommand> {
        if !self.is_held() {
            return None;
        }
        self.current = max_strength.clamp(0.0, 1.0);
        Some(BlowCommand::SetStrength(self.current))
    }

    pub fn update(
        &mut self,
        dt_sec: f32,
        max_strength: f32,
        speed: f32,
        recovery_speed: f32,
    ) -> Option<BlowCommand> {
        let dt = dt_sec.max(0.0);
        match self.phase {
            BlowPhase::Idle | BlowPhase::Holding => None,
            BlowPhase::Rising => {
                self.held_sec += dt;
                let target = max_strength.clamp(0.0, 1.0);
                let mut command = None;
                if self.current < target {
                    self.current = if speed >= BLOW_INSTANT_SPEED {
                        target
                    } else {
                        let duration = BLOW_MAX_RAMP_SEC * (1.0 - speed.max(0.0));
                        let progress = (self.held_sec / duration).min(1.0);
                        target * ease_in_quad(progress)
                    };
                    command = Some(BlowCommand::SetStrength(self.current));
                }
                if self.current >= target {
                    self.phase = BlowPhase::Holding;
                }
                command
            }
            BlowPhase::Releasing => {
                self.release_accum += dt;
                let mut command = None;
                while self.release_accum >= BLOW_RELEASE_STEP_SEC {
                    self.release_accum -= BLOW_RELEASE_STEP_SEC;
                    if self.current > 0.0 {
                        self.current = (self.current - recovery_speed.max(0.0)).max(0.0);
                        command = Some(BlowCommand::SetStrength(self.current));
                    } else {
                        self.phase = BlowPhase::Idle;
                        return Some(BlowCommand::StartRecovery);
                    }
                }
                command
            }
        }
    }
}

/// Forward a gesture command to the flame.
pub fn apply_blow_command(candle: &mut FlameDynamics, command: BlowCommand) {
    match command {
        BlowCommand::SetStrength(s) => candle.set_blow_strength(s),
        BlowCommand::StartRecovery => candle.start_recovery(),
    }
}
