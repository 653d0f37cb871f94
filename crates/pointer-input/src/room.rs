use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Directions with less than this much component along an axis never hit
/// the wall perpendicular to it.
const MIN_AXIS_COMPONENT: f32 = 0.01;

/// Surface of the room a pointer ray lands on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Front,
    Left,
    Right,
    Floor,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomHit {
    pub point: Vec3,
    pub wall: Wall,
}

/// Open box around the user at the origin: side walls at `x = ±width / 2`,
/// floor at `y = -height / 2`, front wall on the screen plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomBox {
    pub width: f32,
    pub height: f32,
}

impl RoomBox {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Cast a ray from the origin along `dir` against the room.
    ///
    /// The front wall wins when the ray lands inside it. Otherwise the
    /// closest of the side wall and the floor is reported. A ray that misses
    /// every surface keeps its front-plane point with [`Wall::None`]; a ray
    /// not heading toward the front wall reports the origin.
    pub fn cast(&self, dir: Vec3, front_distance: f32) -> RoomHit {
        if dir.z <= MIN_AXIS_COMPONENT {
            return RoomHit::default();
        }

        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;

        let t_front = front_distance / dir.z;
        let front = dir * t_front;
        if front.x.abs() <= half_w && front.y.abs() <= half_h {
            return RoomHit {
                point: front,
                wall: Wall::Front,
            };
        }

        let mut closest: Option<(f32, RoomHit)> = None;

        if dir.x.abs() > MIN_AXIS_COMPONENT {
            let (side_x, wall) = if dir.x > 0.0 {
                (half_w, Wall::Right)
            } else {
                (-half_w, Wall::Left)
            };
            let t = side_x / dir.x;
            // Past the front plane the side walls end.
            if t <= t_front {
                closest = Some((t, RoomHit { point: dir * t, wall }));
            }
        }

        if dir.y < -MIN_AXIS_COMPONENT {
            let t = -half_h / dir.y;
            if closest.map_or(true, |(best, _)| t < best) {
                closest = Some((
                    t,
                    RoomHit {
                        point: dir * t,
                        wall: Wall::Floor,
                    },
                ));
            }
        }

        closest.map(|(_, hit)| hit).unwrap_or(RoomHit {
            point: front,
            wall: Wall::None,
        })
    }
}
