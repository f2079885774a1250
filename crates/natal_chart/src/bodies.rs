//! Catalog of chart points: the ten bodies and the two lunar nodes.

use natal_ephem::Body;

/// Anything that can be placed on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartPoint {
    Body(Body),
    NorthNode,
    SouthNode,
}

impl ChartPoint {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Body(b) => b.name(),
            Self::NorthNode => "North Node",
            Self::SouthNode => "South Node",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Body(Body::Sun) => "☉",
            Self::Body(Body::Moon) => "☽",
            Self::Body(Body::Mercury) => "☿",
            Self::Body(Body::Venus) => "♀",
            Self::Body(Body::Mars) => "♂",
            Self::Body(Body::Jupiter) => "♃",
            Self::Body(Body::Saturn) => "♄",
            Self::Body(Body::Uranus) => "♅",
            Self::Body(Body::Neptune) => "♆",
            Self::Body(Body::Pluto) => "♇",
            Self::NorthNode => "☊",
            Self::SouthNode => "☋",
        }
    }

    /// Display colour as `#RRGGBB`.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Body(Body::Sun) => "#FFD700",
            Self::Body(Body::Moon) => "#C0C0C0",
            Self::Body(Body::Mercury) => "#87CEEB",
            Self::Body(Body::Venus) => "#FFC0CB",
            Self::Body(Body::Mars) => "#FF6347",
            Self::Body(Body::Jupiter) => "#FFA500",
            Self::Body(Body::Saturn) => "#DAA520",
            Self::Body(Body::Uranus) => "#40E0D0",
            Self::Body(Body::Neptune) => "#4169E1",
            Self::Body(Body::Pluto) => "#8B4513",
            Self::NorthNode => "#9932CC",
            Self::SouthNode => "#8B008B",
        }
    }

    /// The ephemeris body behind this point, if any.
    pub const fn body(self) -> Option<Body> {
        match self {
            Self::Body(b) => Some(b),
            Self::NorthNode | Self::SouthNode => None,
        }
    }

    /// Nodes are conventionally retrograde; luminaries never are.
    pub const fn can_be_retrograde(self) -> bool {
        match self {
            Self::Body(b) => !b.is_luminary(),
            Self::NorthNode | Self::SouthNode => true,
        }
    }
}

/// A tracked body with its display identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelestialBody {
    pub body: Body,
    pub name: &'static str,
    pub symbol: &'static str,
    pub color: &'static str,
}

impl CelestialBody {
    pub const fn new(body: Body) -> Self {
        let point = ChartPoint::Body(body);
        Self {
            body,
            name: point.name(),
            symbol: point.symbol(),
            color: point.color(),
        }
    }

    pub const fn point(&self) -> ChartPoint {
        ChartPoint::Body(self.body)
    }
}

/// The default body set, Sun through Pluto.
pub const BODY_CATALOG: [CelestialBody; 10] = [
    CelestialBody::new(Body::Sun),
    CelestialBody::new(Body::Moon),
    CelestialBody::new(Body::Mercury),
    CelestialBody::new(Body::Venus),
    CelestialBody::new(Body::Mars),
    CelestialBody::new(Body::Jupiter),
    CelestialBody::new(Body::Saturn),
    CelestialBody::new(Body::Uranus),
    CelestialBody::new(Body::Neptune),
    CelestialBody::new(Body::Pluto),
];
