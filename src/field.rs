// Particle field: a fixed set of drifting particles that bounce off the surface
// edges and are joined by fading lines when they come within reach of each other.

use crate::color::Color;
use crate::error::FieldError;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Size {
        Size { width, height }
    }
}

/// Construction-time settings for a [`ParticleField`]. Fixed for the life of
/// the field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub connection_distance: f64,
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub particle_color: Color,
    pub edge_color: Color,
    pub max_edge_opacity: f64,
    pub edge_width: f64,
}

impl FieldConfig {
    pub const PARTICLE_COUNT: usize = 80;
    pub const CONNECTION_DISTANCE: f64 = 150.0;
    pub const MAX_SPEED: f64 = 0.25;
    pub const MIN_RADIUS: f64 = 1.0;
    pub const MAX_RADIUS: f64 = 3.0;
    pub const PARTICLE_ALPHA: f64 = 0.6;
    pub const MAX_EDGE_OPACITY: f64 = 0.3;
    pub const EDGE_WIDTH: f64 = 1.0;
    // The edge sweep is quadratic per frame; past this the page stalls anyway
    pub const MAX_PARTICLE_COUNT: usize = 10_000;

    /// Reject settings a field cannot be built from.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.particle_count > Self::MAX_PARTICLE_COUNT {
            return Err(FieldError::Allocation(format!(
                "particle count {} exceeds {}",
                self.particle_count,
                Self::MAX_PARTICLE_COUNT
            )));
        }
        if self.connection_distance.is_nan() || self.connection_distance < 0.0 {
            return Err(FieldError::Allocation(format!(
                "connection distance {} is not a non-negative number",
                self.connection_distance
            )));
        }
        Ok(())
    }

    /// Whether two particles `distance` apart get an edge.
    pub fn connects(&self, distance: f64) -> bool {
        distance < self.connection_distance
    }

    /// Edge opacity, fading linearly from `max_edge_opacity` at distance 0
    /// to nothing at `connection_distance` and beyond.
    pub fn edge_opacity(&self, distance: f64) -> f64 {
        if !self.connects(distance) {
            return 0.0;
        }
        (1.0 - distance / self.connection_distance) * self.max_edge_opacity
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        let accent = Color::from_u32(Color::ACCENT);
        FieldConfig {
            particle_count: Self::PARTICLE_COUNT,
            connection_distance: Self::CONNECTION_DISTANCE,
            max_speed: Self::MAX_SPEED,
            min_radius: Self::MIN_RADIUS,
            max_radius: Self::MAX_RADIUS,
            particle_color: accent.with_alpha(Self::PARTICLE_ALPHA),
            edge_color: accent,
            max_edge_opacity: Self::MAX_EDGE_OPACITY,
            edge_width: Self::EDGE_WIDTH,
        }
    }
}

/// An edge between particles `from < to`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub opacity: f64,
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    size: Size,
    config: FieldConfig,
}

impl ParticleField {
    pub fn new(size: Size) -> Self {
        Self::with_config(size, FieldConfig::default())
    }

    pub fn with_config(size: Size, config: FieldConfig) -> Self {
        let mut rng = rand::thread_rng();
        Self::with_rng(size, config, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(size: Size, config: FieldConfig, rng: &mut R) -> Self {
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            particles.push(Particle::random(rng, size, &config));
        }
        ParticleField {
            particles,
            size,
            config,
        }
    }

    /// Field over an explicit particle set. `config.particle_count` is taken
    /// from the set.
    pub fn from_particles(size: Size, mut config: FieldConfig, particles: Vec<Particle>) -> Self {
        config.particle_count = particles.len();
        ParticleField {
            particles,
            size,
            config,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self) {
        let size = self.size;
        for particle in &mut self.particles {
            particle.advance(size);
        }
    }

    /// Every unordered pair close enough to be joined, each reported once.
    pub fn connections(&self) -> Vec<Connection> {
        let mut connections = Vec::new();
        for i in 0..self.particles.len() {
            let p1 = &self.particles[i];
            for j in (i + 1)..self.particles.len() {
                let distance = p1.distance_to(&self.particles[j]);
                if self.config.connects(distance) {
                    connections.push(Connection {
                        from: i,
                        to: j,
                        opacity: self.config.edge_opacity(distance),
                    });
                }
            }
        }
        connections
    }

    /// Draw the current frame. Reads particle state only.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), FieldError> {
        surface.clear(self.size)?;

        for particle in &self.particles {
            surface.fill_circle(particle.pos, particle.radius, self.config.particle_color)?;
        }

        for connection in self.connections() {
            let color = self.config.edge_color.with_alpha(connection.opacity);
            surface.stroke_line(
                self.particles[connection.from].pos,
                self.particles[connection.to].pos,
                color,
                self.config.edge_width,
            )?;
        }

        Ok(())
    }

    // Existing particles keep their place; reflection picks up the new bounds
    // on the next step.
    pub fn on_resize(&mut self, size: Size) {
        self.size = size;
    }
}
