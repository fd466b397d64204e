use glam::Vec2;
use hecs::{Entity, World};
use tracing::{debug, info};

use crate::controllers::{AiController, ControlContext, Controller, PlayerController};
use crate::systems::*;
use crate::{
    Arena, Ball, CoinToss, Config, ConfigError, ControllerKind, Events, GameRng, InputState,
    MatchConfig, Modifiers, Paddle, Params, Score, Side, Time, TossStatus, Touches,
};

/// Match lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    CoinToss,
    Serve,
    Play,
    End,
}

/// Who launches the next ball, and toward whom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Serve {
    pub server: Side,
    pub receiver: Side,
}

/// Terminal report handed to the outside world once END is reached
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// From the local side's point of view
    pub won: bool,
    pub vs_ai: bool,
    pub final_scores: Vec<(Side, u8)>,
    /// `None` when the timer ran out on a tie
    pub winner: Option<Side>,
    /// Simulated seconds since the match was created
    pub duration: f32,
}

/// One running match: world, rules and timers
pub struct Match {
    world: World,
    time: Time,
    config: Config,
    arena: Arena,
    modifiers: Modifiers,
    score: Score,
    events: Events,
    input: InputState,
    rng: GameRng,
    touches: Touches,
    phase: Phase,
    coin_toss: CoinToss,
    match_timer: f32,
    serve_timer: f32,
    serve: Option<Serve>,
    winner: Option<Side>,
    ball: Entity,
    controllers: Vec<(Side, ControllerKind)>,
    local_side: Side,
    result: Option<MatchResult>,
}

impl Match {
    /// Validate the setup and spawn paddles and ball; the match starts in COIN_TOSS
    pub fn new(setup: MatchConfig) -> Result<Self, ConfigError> {
        let controllers = setup.resolve()?;
        let config = setup.tuning.clone();
        let arena = Arena::new(&config, setup.mode, &setup.modifiers);
        let mut rng = GameRng::new(setup.seed);
        let mut world = World::new();

        for (side, kind) in &controllers {
            let paddle = Paddle::new(
                *side,
                arena.paddle_spawn(*side),
                config.paddle_length,
                config.paddle_thickness,
                config.paddle_speed,
            );
            let controller = match kind {
                ControllerKind::Human(binding) => Controller::new(PlayerController::new(*binding)),
                ControllerKind::Ai(difficulty) => Controller::new(AiController::new(*difficulty)),
            };
            crate::create_paddle(&mut world, paddle, controller);
        }
        let ball = crate::create_ball(&mut world, arena.center(), Vec2::ZERO, config.ball_radius);
        let coin_toss = CoinToss::new(setup.mode, &mut rng);

        info!(
            mode = ?setup.mode,
            modifiers = ?setup.modifiers,
            seed = setup.seed,
            "match created"
        );

        Ok(Self {
            world,
            time: Time::new(0.0, 0.0),
            match_timer: config.match_duration,
            serve_timer: config.serve_delay,
            config,
            arena,
            modifiers: setup.modifiers,
            score: Score::new(),
            events: Events::new(),
            input: InputState::new(),
            rng,
            touches: Touches::default(),
            phase: Phase::CoinToss,
            coin_toss,
            serve: None,
            winner: None,
            ball,
            controllers,
            local_side: setup.local_side,
            result: None,
        })
    }

    /// Advance the match by one frame of `delta` seconds
    pub fn update(&mut self, delta: f32) {
        let dt = if delta.is_finite() {
            delta.clamp(0.0, Params::MAX_DT)
        } else {
            0.0
        };
        self.time.dt = dt;
        self.time.now += dt;
        self.events.clear();

        match self.phase {
            Phase::CoinToss => self.update_coin_toss(dt),
            Phase::Serve => self.update_serve(dt),
            Phase::Play => self.update_play(dt),
            Phase::End => decay_ball(&mut self.world, &self.time),
        }

        spawn_bursts(&mut self.world, &self.events.bursts, &mut self.rng);
        update_particles(&mut self.world, &self.time, &self.arena);
        gc(&mut self.world);
    }

    fn update_coin_toss(&mut self, dt: f32) {
        if let TossStatus::Done(winner) = self.coin_toss.advance(dt, &mut self.rng) {
            // Winner receives first strike
            self.begin_serve(winner.opposite(), winner);
        }
    }

    fn update_serve(&mut self, dt: f32) {
        self.drive(false);
        self.serve_timer -= dt;
        if self.serve_timer <= 0.0 {
            self.serve_timer = 0.0;
            self.launch();
        }
    }

    fn update_play(&mut self, dt: f32) {
        self.drive(true);
        move_ball(&mut self.world, &self.time, self.arena.mode.max_spin_angle());
        check_collisions(
            &mut self.world,
            &self.arena,
            &self.config,
            &self.modifiers,
            &mut self.touches,
            &mut self.events,
        );

        if !self.events.departures.is_empty() {
            let ball = self.ball();
            let ctx = ControlContext {
                ball: &ball,
                arena: &self.arena,
                input: &self.input,
                modifiers: &self.modifiers,
                now: self.time.now,
                dt,
                live: true,
            };
            dispatch_departures(&mut self.world, &self.events.departures, &ctx, &mut self.rng);
        }

        if let Some(goal) = check_scoring(
            &self.world,
            &self.arena,
            &self.touches,
            &mut self.score,
            &mut self.events,
        ) {
            let sides = self.arena.sides();
            if let Some(winner) = self.score.has_winner(self.config.win_score, sides) {
                self.finish(Some(winner));
            } else {
                self.begin_serve(goal.conceded, goal.conceded.opposite());
            }
            return;
        }

        self.match_timer -= dt;
        if self.match_timer <= 0.0 {
            self.match_timer = 0.0;
            let leader = self.score.leader(self.arena.sides());
            self.finish(leader);
        }
    }

    /// Run every controller against the current ball
    fn drive(&mut self, live: bool) {
        let ball = self.ball();
        let ctx = ControlContext {
            ball: &ball,
            arena: &self.arena,
            input: &self.input,
            modifiers: &self.modifiers,
            now: self.time.now,
            dt: self.time.dt,
            live,
        };
        drive_paddles(&mut self.world, &ctx, &mut self.rng);
    }

    /// Park the ball in front of `server`, aimed at `receiver`, and start the countdown
    fn begin_serve(&mut self, server: Side, receiver: Side) {
        let spot = self
            .arena
            .serve_spot(server, self.config.ball_radius, Params::SERVE_OFFSET);
        let angle = self.rng.symmetric(Params::SERVE_CONE);
        let vel = serve_direction(server, angle) * self.config.ball_speed_initial;
        self.set_ball(Ball::new(spot, vel, self.config.ball_radius));

        let ball = self.ball();
        let ctx = ControlContext {
            ball: &ball,
            arena: &self.arena,
            input: &self.input,
            modifiers: &self.modifiers,
            now: self.time.now,
            dt: self.time.dt,
            live: false,
        };
        reset_paddles(&mut self.world, &ctx);

        self.touches.clear();
        self.serve = Some(Serve { server, receiver });
        self.serve_timer = self.config.serve_delay;
        self.phase = Phase::Serve;
        info!(?server, ?receiver, "serve");
    }

    /// Release the parked ball; a human server holding one key steers it
    fn launch(&mut self) {
        let Some(serve) = self.serve else {
            return;
        };
        if let Some(bias) = self.held_serve_bias(serve.server) {
            let mut ball = self.ball();
            ball.vel = serve_direction(serve.server, bias) * ball.vel.length();
            self.set_ball(ball);
        }
        // The server counts as the first touch of the rally
        self.touches.record(serve.server);
        self.phase = Phase::Play;
        info!(server = ?serve.server, vel = ?self.ball().vel, "play");
    }

    fn held_serve_bias(&self, server: Side) -> Option<f32> {
        let is_human = self
            .controllers
            .iter()
            .any(|(side, kind)| *side == server && !kind.is_ai());
        if !is_human {
            return None;
        }
        let intent = self
            .world
            .query::<(&Paddle, &Controller)>()
            .iter()
            .find(|(_e, (paddle, _))| paddle.side == server)
            .map(|(_e, (_, controller))| controller.0.intent())?;
        match (intent.up_held, intent.down_held) {
            (true, false) => Some(-Params::SERVE_BIAS),
            (false, true) => Some(Params::SERVE_BIAS),
            _ => None,
        }
    }

    fn finish(&mut self, winner: Option<Side>) {
        self.phase = Phase::End;
        self.winner = winner;
        let vs_ai = self
            .controllers
            .iter()
            .any(|(side, kind)| *side != self.local_side && kind.is_ai());
        let result = MatchResult {
            won: winner == Some(self.local_side),
            vs_ai,
            final_scores: self.score.for_sides(self.arena.sides()),
            winner,
            duration: self.time.now,
        };
        info!(?winner, scores = ?result.final_scores, "match over");
        self.result = Some(result);
    }

    /// Result of a finished match; returns `Some` exactly once
    pub fn take_result(&mut self) -> Option<MatchResult> {
        let result = self.result.take();
        if result.is_some() {
            debug!("match result taken");
        }
        result
    }

    pub fn ball(&self) -> Ball {
        self.world
            .get::<&Ball>(self.ball)
            .map(|ball| *ball)
            .unwrap_or_else(|_| Ball::new(self.arena.center(), Vec2::ZERO, self.config.ball_radius))
    }

    /// Overwrite the ball state (scripted scenarios and drivers)
    pub fn set_ball(&mut self, ball: Ball) {
        if let Ok(mut stored) = self.world.get::<&mut Ball>(self.ball) {
            *stored = ball;
        }
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .query::<&Paddle>()
            .iter()
            .map(|(_e, paddle)| *paddle)
            .find(|paddle| paddle.side == side)
    }

    /// Held keys read by human controllers on the next update
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn coin_toss(&self) -> &CoinToss {
        &self.coin_toss
    }

    pub fn serve(&self) -> Option<Serve> {
        self.serve
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn match_timer(&self) -> f32 {
        self.match_timer
    }

    pub fn serve_timer(&self) -> f32 {
        self.serve_timer
    }

    pub fn touches(&self) -> &Touches {
        &self.touches
    }

    pub fn controllers(&self) -> &[(Side, ControllerKind)] {
        &self.controllers
    }
}

/// Launch direction from `server`, rotated by `angle` off the field normal
pub fn serve_direction(server: Side, angle: f32) -> Vec2 {
    server.inward() * angle.cos() + server.orientation().along_axis() * angle.sin()
}
