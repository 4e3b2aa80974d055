//! Example that demonstrates the exact usage shown in the README.md file.

use pool_list::{Lifecycle, PoolList, Poolable};

struct Particle {
    position: (f32, f32),
    trail: Vec<(f32, f32)>,
    alive: bool,
}

impl Poolable for Particle {
    fn on_release(&mut self) {
        // Keep the allocation, drop the contents.
        self.trail.clear();
    }
}

struct Spawn;

impl Lifecycle<Particle> for Spawn {
    fn activate(&mut self, item: &mut Particle) {
        item.position = (0.0, 0.0);
        item.alive = true;
    }

    fn deactivate(&mut self, item: &mut Particle) {
        item.alive = false;
    }
}

fn main() {
    println!("=== Pool List README Example ===");

    let mut particles = PoolList::builder(|| Particle {
        position: (0.0, 0.0),
        trail: Vec::with_capacity(64),
        alive: false,
    })
    .lifecycle(Spawn)
    .release_poolable_items()
    .build();

    // Grow to 100 particles; all of them are created by the factory.
    particles.scope(100).expect("the factory cannot fail");

    for particle in &mut particles {
        particle.position.0 += 1.0;
        particle.trail.push(particle.position);
    }

    // Shrink to 10; the other 90 are kept for reuse.
    particles.scope(10).expect("shrinking cannot fail");
    println!(
        "Active: {}, waiting for reuse: {}",
        particles.len(),
        particles.inactive_len()
    );

    // Grow again; no new particles are created.
    particles.scope(50).expect("the factory cannot fail");
    println!("Total particles ever created: {}", particles.total_len());

    println!("README example completed successfully!");
}
