//! Cycle controller: builds a grid, drives the walk one edge per tick and
//! restarts once the walk is exhausted.

use rand::Rng;
use tracing::{debug, info};

use crate::{
    config::{Config, RestartPolicy},
    error::Result,
    graph::Graph,
    grid::GridKind,
    phases::{self, LeafDot},
    surface::Surface,
    walk::{Edge, Walk},
};

/// State owned by a single cycle: the grid and the walk over it.
#[derive(Debug, Clone)]
pub struct Cycle {
    pub kind: GridKind,
    pub graph: Graph,
    pub walk: Walk,
}

impl Cycle {
    /// Builds the grid for `kind` and seeds the walk at its start node.
    pub fn begin(kind: GridKind, cfg: &Config) -> Result<Self> {
        let graph = kind.build(cfg)?;
        let start = graph
            .start()
            .ok_or(crate::error::Error::EmptyGrid { kind })?;
        Ok(Self {
            kind,
            graph,
            walk: Walk::new(start),
        })
    }
}

/// Where the controller is within the current cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// The walk is still growing.
    Walking,
    /// The walk was exhausted at `since`; a new cycle starts once the
    /// restart delay has passed.
    Waiting { since: f64 },
}

/// What a single [`CycleController::tick`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum Tick {
    /// One edge was added; `leaves` were colored afterwards.
    Stepped { edge: Edge, leaves: Vec<LeafDot> },
    /// The walk ran out of frontier; `leaves` are the final colorings.
    Exhausted { leaves: Vec<LeafDot> },
    /// Still waiting for the restart delay.
    Waiting,
    /// A new cycle on this grid kind was started.
    Restarted(GridKind),
}

/// Drives the animation across cycles.
///
/// The controller owns the current [`Cycle`] and the RNG; every call to
/// [`CycleController::tick`] performs one logical step and draws its result
/// on the given [`Surface`].
pub struct CycleController<R: Rng> {
    cfg: Config,
    rng: R,
    cycle: Cycle,
    phase: Phase,
    cycles_started: u64,
}

impl<R: Rng> CycleController<R> {
    /// Validates `cfg` and starts the first cycle.
    ///
    /// With [`RestartPolicy::Delayed`] the first cycle uses the policy's
    /// `first` grid kind; with [`RestartPolicy::Immediate`] it is random.
    ///
    /// ### Errors
    /// Returns the validation error or [`crate::error::Error::EmptyGrid`] if
    /// the first grid cannot be built.
    pub fn new(cfg: Config, mut rng: R, surface: &mut impl Surface) -> Result<Self> {
        cfg.validate()?;
        let kind = match cfg.restart {
            RestartPolicy::Delayed { first, .. } => first,
            RestartPolicy::Immediate => GridKind::random(&mut rng),
        };
        let cycle = Cycle::begin(kind, &cfg)?;
        surface.background(cfg.background);
        info!(kind = %kind, nodes = cycle.graph.len(), "cycle started");

        Ok(Self {
            cfg,
            rng,
            cycle,
            phase: Phase::Walking,
            cycles_started: 1,
        })
    }

    pub fn cycle(&self) -> &Cycle {
        &self.cycle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Number of cycles started so far, including the current one.
    pub fn cycles_started(&self) -> u64 {
        self.cycles_started
    }

    /// Seconds to wait between exhaustion and the next cycle.
    pub fn restart_delay(&self) -> f64 {
        match self.cfg.restart {
            RestartPolicy::Delayed { delay_secs, .. } => delay_secs,
            RestartPolicy::Immediate => 0.0,
        }
    }

    /// Advances the animation by one logical step at time `now` (seconds).
    ///
    /// - While walking: extends the walk by one edge and colors any new
    ///   leaves. If no edge can be added, finalizes the leaves and starts
    ///   waiting.
    /// - While waiting: restarts with a uniformly chosen grid kind once the
    ///   restart delay has elapsed since exhaustion.
    pub fn tick(&mut self, now: f64, surface: &mut impl Surface) -> Result<Tick> {
        match self.phase {
            Phase::Walking => Ok(self.walk_step(now, surface)),
            Phase::Waiting { since } => {
                if now - since >= self.restart_delay() {
                    let kind = self.restart(surface)?;
                    Ok(Tick::Restarted(kind))
                } else {
                    Ok(Tick::Waiting)
                }
            }
        }
    }

    /// Starts a new cycle right away on a uniformly chosen grid kind.
    pub fn restart(&mut self, surface: &mut impl Surface) -> Result<GridKind> {
        let kind = GridKind::random(&mut self.rng);
        self.restart_with(kind, surface)?;
        Ok(kind)
    }

    /// Starts a new cycle right away on `kind`.
    pub fn restart_with(&mut self, kind: GridKind, surface: &mut impl Surface) -> Result<()> {
        self.cycle = Cycle::begin(kind, &self.cfg)?;
        self.phase = Phase::Walking;
        self.cycles_started += 1;
        surface.background(self.cfg.background);
        info!(
            kind = %kind,
            nodes = self.cycle.graph.len(),
            cycle = self.cycles_started,
            "cycle started"
        );
        Ok(())
    }

    fn walk_step(&mut self, now: f64, surface: &mut impl Surface) -> Tick {
        let Cycle { kind, graph, walk } = &mut self.cycle;

        match phases::extend_phase(graph, walk, &mut self.rng) {
            Some(edge) => {
                if let (Some(a), Some(b)) = (graph.position(edge.from), graph.position(edge.to)) {
                    surface.stroke(self.cfg.edge_color, self.cfg.edge_weight);
                    surface.line(a, b);
                }
                let leaves = phases::leaf_phase(
                    graph,
                    walk,
                    &self.cfg.palette,
                    kind.leaf_dot_size(),
                    &mut self.rng,
                );
                draw_leaves(&leaves, surface);
                Tick::Stepped { edge, leaves }
            }
            None => {
                let leaves = phases::leaf_phase(
                    graph,
                    walk,
                    &self.cfg.palette,
                    kind.leaf_dot_size(),
                    &mut self.rng,
                );
                draw_leaves(&leaves, surface);
                info!(
                    kind = %kind,
                    edges = walk.edges().len(),
                    leaves = walk.leaf_count(),
                    "walk exhausted"
                );
                debug!(delay = self.restart_delay(), "restart scheduled");
                self.phase = Phase::Waiting { since: now };
                Tick::Exhausted { leaves }
            }
        }
    }
}

fn draw_leaves(leaves: &[LeafDot], surface: &mut impl Surface) {
    for dot in leaves {
        surface.fill(dot.color);
        surface.ellipse(dot.pos, dot.diameter);
    }
}
