/// Gameplay modifiers chosen once when the match is configured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Multiply the ball speed coefficient on every paddle hit
    pub speed_increase: bool,
    /// Reflection angle follows where the ball meets the paddle
    pub angular_bounce: bool,
    /// Held keys (or AI intent) at contact put spin on the ball
    pub spin: bool,
    /// Goal edges become walls with a scoring tunnel in the middle
    pub arena: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            speed_increase: true,
            angular_bounce: true,
            spin: true,
            arena: true,
        }
    }
}
