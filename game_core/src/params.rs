/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    pub const GOAL_SIZE: f32 = 200.0; // Tunnel opening with the arena modifier
    pub const GOAL_MARGIN: f32 = 20.0; // Distance past the edge before a goal counts

    // Paddle
    pub const PADDLE_THICKNESS: f32 = 10.0;
    pub const PADDLE_LENGTH: f32 = 100.0;
    pub const PADDLE_MARGIN: f32 = 20.0; // Gap between arena edge and paddle back
    pub const PADDLE_SPEED: f32 = 420.0; // px per second

    // Ball
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SPEED_INITIAL: f32 = 300.0;
    pub const BALL_SPEED_INCREASE: f32 = 1.08; // speedCoef multiplier per paddle hit
    pub const SERVE_OFFSET: f32 = 40.0; // Ball distance in front of the serving paddle
    pub const SERVE_CONE: f32 = 0.26; // Half-angle of the random serve cone (rad)
    pub const SERVE_BIAS: f32 = 0.35; // Serve angle when the server holds a key (rad)

    // Modifiers
    pub const BOUNCE_ANGLE_TWO: f32 = std::f32::consts::FRAC_PI_4;
    pub const BOUNCE_ANGLE_FOUR: f32 = std::f32::consts::FRAC_PI_3;
    pub const SPIN_RATE: f32 = 1.6; // rad per second
    pub const SPIN_BOOST: f32 = 1.1;
    pub const SPIN_MAX_ANGLE_TWO: f32 = 0.728;
    pub const SPIN_MAX_ANGLE_FOUR: f32 = 0.786;

    // Match
    pub const WIN_SCORE: u8 = 7;
    pub const MATCH_DURATION: f32 = 180.0;
    pub const SERVE_DELAY: f32 = 3.0;
    pub const COIN_TOSS_ROLL: f32 = 4.0;
    pub const COIN_TOSS_RESULT: f32 = 2.0;
    pub const COIN_TOSS_SLOWEST: f32 = 0.5;
    pub const COIN_TOSS_FASTEST: f32 = 0.03;
    pub const END_DECAY: f32 = 1.05; // Ball velocity divisor per frame after the match

    // AI
    pub const AI_PREDICTION_DT: f32 = 1.0 / 240.0;
    pub const AI_PREDICTION_MAX_STEPS: usize = 240 * 8;
    pub const AI_UNCERTAINTY: f32 = 200.0;
    pub const AI_DEAD_BAND: f32 = 8.0;
    pub const AI_MIN_STICKINESS: f32 = 0.05;
    pub const AI_SAFE_BAND: f32 = 0.25; // Fraction of the arena kept clear on each side for spin play
    pub const AI_SPIN_FOLLOW: f64 = 0.66;

    // Particles
    pub const PARTICLE_LIFE: f32 = 0.6;
    pub const PARTICLE_DAMPING: f32 = 0.95;
    pub const PARTICLE_RESTITUTION: f32 = 0.5;
    pub const PARTICLE_SPEED_MIN: f32 = 60.0;
    pub const PARTICLE_SPEED_MAX: f32 = 220.0;
    pub const PARTICLES_WALL: usize = 8;
    pub const PARTICLES_PADDLE: usize = 14;
    pub const PARTICLES_GOAL: usize = 24;
    pub const MAX_PARTICLES: usize = 256;

    // Physics
    pub const MAX_DT: f32 = 0.1;
}
