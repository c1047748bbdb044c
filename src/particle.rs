// Simple particle struct to keep track of individual position, velocity, and radius

use crate::field::{FieldConfig, Size};
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
        }
    }

    // Uniform position over the surface, per-axis velocity in [-max_speed, max_speed)
    // and radius in [min_radius, max_radius)
    pub fn random<R: Rng + ?Sized>(rng: &mut R, size: Size, config: &FieldConfig) -> Particle {
        let pos_x = rng.gen::<f64>() * size.width;
        let pos_y = rng.gen::<f64>() * size.height;
        let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let radius = rng.gen::<f64>() * (config.max_radius - config.min_radius) + config.min_radius;
        Particle::new(pos_x, pos_y, vel_x, vel_y, radius)
    }

    /// One frame of Euler integration followed by per-axis reflection.
    ///
    /// The position is not pulled back inside, so a particle may sit past an
    /// edge for a single frame before the flipped velocity brings it back.
    /// Reflection always points the velocity back inward, so a particle left
    /// outside by a shrinking surface drifts home instead of jittering.
    pub fn advance(&mut self, size: Size) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        self.vel[0] = reflect(self.pos[0], self.vel[0], size.width);
        self.vel[1] = reflect(self.pos[1], self.vel[1], size.height);
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, other.pos))
    }
}

fn reflect(pos: f64, vel: f64, extent: f64) -> f64 {
    if pos < 0.0 {
        vel.abs()
    } else if pos > extent {
        -vel.abs()
    } else {
        vel
    }
}
