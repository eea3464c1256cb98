//! Gun and bucket manipulation shared by keyboard and pointer input

use glam::Vec2;

use super::entity::{Category, Color, GameObject};
use super::error::SimError;
use super::layout::{GUN_ARM, GUN_BASE, GUN_ROTATOR};
use super::state::{Bucket, Grab, Sign, Simulation};
use crate::consts::*;
use crate::heading;
use crate::renderer::Presenter;

const ROTATOR_MIN: f32 = -ARM_ANGLE_LIMIT + ROTATOR_OFFSET;
const ROTATOR_MAX: f32 = ARM_ANGLE_LIMIT + ROTATOR_OFFSET;

/// Place every gun part at elevation `y`, clamped to the rail
pub fn set_gun_elevation(sim: &mut Simulation, y: f32) {
    let y = y.clamp(GUN_ELEVATION_MIN, GUN_ELEVATION_MAX);
    for part in sim.store.iter_mut(Category::GunParts) {
        part.y = y;
    }
}

/// Move the gun one step up or down
pub fn elevate_gun(sim: &mut Simulation, sign: Sign) -> Result<(), SimError> {
    let y = sim.store.get(Category::GunParts, GUN_ARM)?.y;
    set_gun_elevation(sim, y + sign.value() * GUN_ELEVATION_STEP);
    Ok(())
}

/// Point the arm at `angle` degrees; the rotator follows 45 degrees ahead
pub fn set_arm_angle(sim: &mut Simulation, angle: f32) -> Result<(), SimError> {
    let angle = angle.clamp(-ARM_ANGLE_LIMIT, ARM_ANGLE_LIMIT);
    sim.store.get_mut(Category::GunParts, GUN_ARM)?.angle = angle;
    sim.store.get_mut(Category::GunParts, GUN_ROTATOR)?.angle =
        (angle + ROTATOR_OFFSET).clamp(ROTATOR_MIN, ROTATOR_MAX);
    Ok(())
}

/// Tilt the gun one step
pub fn tilt_gun(sim: &mut Simulation, sign: Sign) -> Result<(), SimError> {
    let step = sign.value() * GUN_TILT_STEP;
    let arm = sim.store.get_mut(Category::GunParts, GUN_ARM)?;
    arm.angle = (arm.angle + step).clamp(-ARM_ANGLE_LIMIT, ARM_ANGLE_LIMIT);
    let rotator = sim.store.get_mut(Category::GunParts, GUN_ROTATOR)?;
    rotator.angle = (rotator.angle + step).clamp(ROTATOR_MIN, ROTATOR_MAX);
    Ok(())
}

/// World position of the gun pivot
pub fn gun_pivot(sim: &Simulation) -> Result<Vec2, SimError> {
    let arm = sim.store.get(Category::GunParts, GUN_ARM)?;
    Ok(Vec2::new(GUN_PIVOT_X + arm.x, arm.y))
}

/// Aim the arm at a world point if the required angle is within the arm's
/// range. Returns whether the aim was accepted.
pub fn aim_arm_at(sim: &mut Simulation, target: Vec2) -> Result<bool, SimError> {
    let d = target - gun_pivot(sim)?;
    let angle = d.y.atan2(d.x).to_degrees();
    if !(-ARM_ANGLE_LIMIT..=ARM_ANGLE_LIMIT).contains(&angle) {
        return Ok(false);
    }
    set_arm_angle(sim, angle)?;
    Ok(true)
}

pub fn set_bucket_x(sim: &mut Simulation, bucket: Bucket, x: f32) -> Result<(), SimError> {
    sim.store.get_mut(Category::Buckets, bucket.name())?.x = x.clamp(-BUCKET_LIMIT, BUCKET_LIMIT);
    Ok(())
}

pub fn move_bucket(sim: &mut Simulation, bucket: Bucket, sign: Sign) -> Result<(), SimError> {
    let x = sim.store.get(Category::Buckets, bucket.name())?.x;
    set_bucket_x(sim, bucket, x + sign.value() * BUCKET_STEP)
}

/// Decide what a left-button press at world point `at` picks up.
///
/// Buckets win over the gun body; anywhere else tries to aim the arm, which
/// only succeeds within the arm's angular range.
pub fn grab_at(sim: &mut Simulation, at: Vec2) -> Result<Grab, SimError> {
    for bucket in [Bucket::Red, Bucket::Blue] {
        if sim.store.get(Category::Buckets, bucket.name())?.rect().contains(at) {
            return Ok(bucket.grab());
        }
    }

    let base = sim.store.get(Category::GunParts, GUN_BASE)?;
    let mut body = base.rect();
    body.center.x += GUN_PIVOT_X;
    if body.contains(at) {
        return Ok(Grab::GunElevation);
    }

    if aim_arm_at(sim, at)? {
        Ok(Grab::ArmAim)
    } else {
        Ok(Grab::None)
    }
}

/// Fire a beam from the muzzle if the weapon is ready.
///
/// Returns whether a beam was created.
pub fn fire(sim: &mut Simulation, gfx: &mut impl Presenter, now: f64) -> Result<bool, SimError> {
    if sim.state.game_over || !sim.state.weapon_ready {
        return Ok(false);
    }

    let arm = sim.store.get(Category::GunParts, GUN_ARM)?;
    let angle = arm.angle;
    let muzzle = Vec2::new(GUN_PIVOT_X + arm.x, arm.y) + heading(angle) * MUZZLE_DISTANCE;

    let name = format!("beam{}", sim.state.beam_index);
    let beam = GameObject::new(name, Color::Red, muzzle.x, muzzle.y, BEAM_THICKNESS, BEAM_LENGTH)
        .rotated(angle);
    sim.store.create(gfx, Category::Beams, beam)?;

    sim.state.beam_index += 1;
    sim.state.weapon_ready = false;
    sim.state.last_beam_time = now;
    log::debug!("Beam fired at {:.1} deg from ({:.1}, {:.1})", angle, muzzle.x, muzzle.y);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::settings::Settings;

    fn sim() -> (Simulation, DrawList) {
        let mut gfx = DrawList::new();
        let settings = Settings {
            seed: Some(7),
            ..Settings::default()
        };
        let sim = Simulation::new(&mut gfx, &settings, 0.0).unwrap();
        (sim, gfx)
    }

    fn arm_angle(sim: &Simulation) -> f32 {
        sim.store.get(Category::GunParts, GUN_ARM).unwrap().angle
    }

    fn rotator_angle(sim: &Simulation) -> f32 {
        sim.store.get(Category::GunParts, GUN_ROTATOR).unwrap().angle
    }

    #[test]
    fn tilt_keeps_rotator_ahead_of_arm() {
        let (mut sim, _) = sim();
        tilt_gun(&mut sim, Sign::Plus).unwrap();
        assert_eq!(arm_angle(&sim), 10.0);
        assert_eq!(rotator_angle(&sim), 55.0);
        for _ in 0..20 {
            tilt_gun(&mut sim, Sign::Minus).unwrap();
        }
        assert_eq!(arm_angle(&sim), -60.0);
        assert_eq!(rotator_angle(&sim), -15.0);
    }

    #[test]
    fn elevation_moves_all_parts_and_clamps() {
        let (mut sim, _) = sim();
        for _ in 0..30 {
            elevate_gun(&mut sim, Sign::Plus).unwrap();
        }
        assert!(sim.store.iter(Category::GunParts).all(|p| p.y == GUN_ELEVATION_MAX));
        set_gun_elevation(&mut sim, -1000.0);
        assert!(sim.store.iter(Category::GunParts).all(|p| p.y == GUN_ELEVATION_MIN));
    }

    #[test]
    fn bucket_moves_in_steps_and_clamps() {
        let (mut sim, _) = sim();
        move_bucket(&mut sim, Bucket::Red, Sign::Plus).unwrap();
        assert_eq!(sim.store.get(Category::Buckets, Bucket::Red.name()).unwrap().x, 210.0);
        set_bucket_x(&mut sim, Bucket::Blue, -900.0).unwrap();
        assert_eq!(sim.store.get(Category::Buckets, Bucket::Blue.name()).unwrap().x, -BUCKET_LIMIT);
    }

    #[test]
    fn grab_priorities() {
        let (mut sim, _) = sim();
        assert_eq!(grab_at(&mut sim, Vec2::new(200.0, -275.0)).unwrap(), Grab::RedBucket);
        assert_eq!(grab_at(&mut sim, Vec2::new(-200.0, -260.0)).unwrap(), Grab::BlueBucket);
        assert_eq!(grab_at(&mut sim, Vec2::new(-370.0, 10.0)).unwrap(), Grab::GunElevation);

        // Up and to the right of the pivot at 45 degrees aims the arm
        assert_eq!(grab_at(&mut sim, Vec2::new(-275.0, 100.0)).unwrap(), Grab::ArmAim);
        assert!((arm_angle(&sim) - 45.0).abs() < 1e-3);
        assert!((rotator_angle(&sim) - 90.0).abs() < 1e-3);

        // Straight above the pivot is outside the arm's range
        assert_eq!(grab_at(&mut sim, Vec2::new(-375.0, 250.0)).unwrap(), Grab::None);
    }

    #[test]
    fn fire_respects_readiness() {
        let (mut sim, mut gfx) = sim();
        assert!(fire(&mut sim, &mut gfx, 0.0).unwrap());
        assert!(!fire(&mut sim, &mut gfx, 0.5).unwrap());
        assert_eq!(sim.store.len(Category::Beams), 1);

        let beam = sim.store.get(Category::Beams, "beam0").unwrap();
        assert!((beam.x - (GUN_PIVOT_X + MUZZLE_DISTANCE)).abs() < 1e-3);
        assert_eq!(beam.y, 0.0);
    }
}
