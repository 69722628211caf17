//! Plane geometry for card layout.
//!
//! Coordinates follow screen conventions: x grows to the right, y grows
//! downward, and a positive rotation turns clockwise on screen.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn lerp(self, to: Point, t: f64) -> Self {
        Self::new(lerp(self.x, to.x, t), lerp(self.y, to.y, t))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A similarity transform: uniform scale, then rotation, then translation.
///
/// `rotated` and `translated_by` prepend their operation, so it is applied
/// before the existing transform. That matches how a view's transform is
/// built up in the fan layout (`translation(..).rotated(angle)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub tx: f64,
    pub ty: f64,
    pub rotation: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        tx: 0.0,
        ty: 0.0,
        rotation: 0.0,
        scale: 1.0,
    };

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    pub fn scale(scale: f64) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    pub fn rotated(self, angle: f64) -> Self {
        Self {
            rotation: self.rotation + angle,
            ..self
        }
    }

    /// Translate in the transform's own (rotated, scaled) frame.
    pub fn translated_by(self, dx: f64, dy: f64) -> Self {
        let (sin, cos) = self.rotation.sin_cos();
        Self {
            tx: self.tx + self.scale * (dx * cos - dy * sin),
            ty: self.ty + self.scale * (dx * sin + dy * cos),
            ..self
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        let (sin, cos) = self.rotation.sin_cos();
        Point::new(
            self.scale * (p.x * cos - p.y * sin) + self.tx,
            self.scale * (p.x * sin + p.y * cos) + self.ty,
        )
    }

    pub fn lerp(self, to: Transform, t: f64) -> Self {
        Self {
            tx: lerp(self.tx, to.tx, t),
            ty: lerp(self.ty, to.ty, t),
            rotation: lerp(self.rotation, to.rotation, t),
            scale: lerp(self.scale, to.scale, t),
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
