//! Anchor kinds. Each one turns its data into a point, calling back into
//! the resolver for `#` properties.

use crate::registry::AnchorKind;
use crate::resolver::Resolver;
use keyscene_api_core::{PropertyMap, Vec2};

/// Literal `x`/`y`, optionally as a fraction of the canvas.
pub struct Position;

impl AnchorKind for Position {
    fn name(&self) -> &str {
        "Position"
    }

    fn make(&self) -> PropertyMap {
        PropertyMap::new()
            .with("x", 0.0)
            .with("y", 0.0)
            .with("useFraction", false)
    }

    fn resolve(&self, data: &PropertyMap, resolver: &Resolver<'_>) -> Vec2 {
        let p = Vec2::new(data.number("x"), data.number("y"));
        if data.flag("useFraction") {
            p.component_mul(resolver.canvas())
        } else {
            p
        }
    }
}

/// A scalar as the uniform vector `(radius, radius)`; feeds size references.
pub struct Radius;

impl AnchorKind for Radius {
    fn name(&self) -> &str {
        "Radius"
    }

    fn make(&self) -> PropertyMap {
        PropertyMap::new().with("radius", 0.0)
    }

    fn resolve(&self, data: &PropertyMap, _: &Resolver<'_>) -> Vec2 {
        Vec2::splat(data.number("radius"))
    }
}

/// Point `offset` units from `#center` at `angle` degrees.
pub struct RotateAround;

impl AnchorKind for RotateAround {
    fn name(&self) -> &str {
        "RotateAround"
    }

    fn make(&self) -> PropertyMap {
        PropertyMap::new()
            .with("#center", "")
            .with("angle", 0.0)
            .with("offset", 20.0)
    }

    fn resolve(&self, data: &PropertyMap, resolver: &Resolver<'_>) -> Vec2 {
        let center = resolver.resolve(data.text("#center"));
        let arm = Vec2::from_angle(data.number("angle").to_radians()).scale(data.number("offset"));
        center + arm
    }
}

/// `#origin` shifted by `x`/`y`.
pub struct Offset;

impl AnchorKind for Offset {
    fn name(&self) -> &str {
        "Offset"
    }

    fn make(&self) -> PropertyMap {
        PropertyMap::new()
            .with("#origin", "")
            .with("x", 0.0)
            .with("y", 0.0)
    }

    fn resolve(&self, data: &PropertyMap, resolver: &Resolver<'_>) -> Vec2 {
        resolver.resolve(data.text("#origin")) + Vec2::new(data.number("x"), data.number("y"))
    }
}

/// `frac` of the way from `#from` to `#to`.
pub struct Lerp;

impl AnchorKind for Lerp {
    fn name(&self) -> &str {
        "Lerp"
    }

    fn make(&self) -> PropertyMap {
        PropertyMap::new()
            .with("#from", "")
            .with("#to", "")
            .with("frac", 0.0)
    }

    fn resolve(&self, data: &PropertyMap, resolver: &Resolver<'_>) -> Vec2 {
        let from = resolver.resolve(data.text("#from"));
        let to = resolver.resolve(data.text("#to"));
        from.lerp(to, data.number("frac"))
    }
}
