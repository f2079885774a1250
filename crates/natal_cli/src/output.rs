//! Text tables and JSON views of chart values.

use natal_chart::{
    Aspect, HouseSet, NatalChart, Placement, Position, SynastryChart, TransitChart, house_name,
    ordinal, sign_position,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PositionJson {
    pub name: &'static str,
    pub symbol: &'static str,
    pub color: &'static str,
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub sign: &'static str,
    pub sign_symbol: &'static str,
    pub element: &'static str,
    pub degrees_in_sign: f64,
    pub formatted: String,
    pub retrograde: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
}

impl PositionJson {
    pub fn new(p: &Position, house: Option<u8>) -> Self {
        Self {
            name: p.name(),
            symbol: p.symbol(),
            color: p.point.color(),
            longitude_deg: p.longitude_deg,
            latitude_deg: p.latitude_deg,
            sign: p.sign.sign.name(),
            sign_symbol: p.sign.sign.symbol(),
            element: p.sign.sign.element().name(),
            degrees_in_sign: p.sign.degrees_in_sign,
            formatted: p.formatted_degree(),
            retrograde: p.retrograde,
            house,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CuspJson {
    pub house: u8,
    pub name: &'static str,
    pub longitude_deg: f64,
    pub formatted: String,
}

#[derive(Debug, Serialize)]
pub struct HousesJson {
    pub system: &'static str,
    pub degraded: bool,
    pub ascendant_deg: f64,
    pub midheaven_deg: f64,
    pub descendant_deg: f64,
    pub imum_coeli_deg: f64,
    pub cusps: Vec<CuspJson>,
}

impl HousesJson {
    pub fn new(h: &HouseSet) -> Self {
        let cusps = h
            .cusps
            .iter()
            .zip(1u8..)
            .map(|(&lon, house)| CuspJson {
                house,
                name: house_name(house).unwrap_or_default(),
                longitude_deg: lon,
                formatted: sign_position(lon).formatted(),
            })
            .collect();
        Self {
            system: h.system.id(),
            degraded: h.degraded,
            ascendant_deg: h.ascendant_deg,
            midheaven_deg: h.midheaven_deg,
            descendant_deg: h.descendant_deg,
            imum_coeli_deg: h.imum_coeli_deg,
            cusps,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AspectJson {
    pub first: &'static str,
    pub second: &'static str,
    pub aspect: &'static str,
    pub symbol: &'static str,
    pub color: &'static str,
    pub angle_deg: f64,
    pub separation_deg: f64,
    pub orb_deg: f64,
    pub deviation_deg: f64,
    pub exact: bool,
}

impl AspectJson {
    pub fn new(a: &Aspect) -> Self {
        Self {
            first: a.first.name(),
            second: a.second.name(),
            aspect: a.aspect.name(),
            symbol: a.aspect.symbol,
            color: a.aspect.color,
            angle_deg: a.aspect.angle_deg,
            separation_deg: a.separation_deg,
            orb_deg: a.orb_deg,
            deviation_deg: a.deviation_deg,
            exact: a.exact,
        }
    }
}

fn positions_json(positions: &[Position], placements: &[Placement]) -> Vec<PositionJson> {
    positions
        .iter()
        .zip(placements)
        .map(|(p, pl)| PositionJson::new(p, Some(pl.house)))
        .collect()
}

fn aspects_json(aspects: &[Aspect]) -> Vec<AspectJson> {
    aspects.iter().map(AspectJson::new).collect()
}

#[derive(Debug, Serialize)]
pub struct NatalJson {
    pub time: String,
    pub jd_utc: f64,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub houses: HousesJson,
    pub positions: Vec<PositionJson>,
    pub aspects: Vec<AspectJson>,
}

impl NatalJson {
    pub fn new(c: &NatalChart) -> Self {
        Self {
            time: c.time.to_string(),
            jd_utc: c.jd_utc,
            latitude_deg: c.observer.latitude_deg,
            longitude_deg: c.observer.longitude_deg,
            houses: HousesJson::new(&c.houses),
            positions: positions_json(&c.positions, &c.placements),
            aspects: aspects_json(&c.aspects),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SynastryJson {
    pub first: NatalJson,
    pub second: NatalJson,
    pub aspects: Vec<AspectJson>,
}

impl SynastryJson {
    pub fn new(s: &SynastryChart) -> Self {
        Self {
            first: NatalJson::new(&s.first),
            second: NatalJson::new(&s.second),
            aspects: aspects_json(&s.aspects),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransitJson {
    pub natal: NatalJson,
    pub time: String,
    pub jd_utc: f64,
    pub positions: Vec<PositionJson>,
    pub aspects: Vec<AspectJson>,
}

impl TransitJson {
    pub fn new(t: &TransitChart) -> Self {
        Self {
            natal: NatalJson::new(&t.natal),
            time: t.time.to_string(),
            jd_utc: t.jd_utc,
            positions: positions_json(&t.positions, &t.placements),
            aspects: aspects_json(&t.aspects),
        }
    }
}

/// Pretty JSON on stdout; a serialization failure exits with status 1.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}

pub fn position_row(p: &Position, house: Option<u8>) -> String {
    let house = house.map(|h| ordinal(h.into())).unwrap_or_default();
    format!(
        "{:<2} {:<11} {:>9.4}  {:<12} {:<12} {:<3} {:>5}",
        p.symbol(),
        p.name(),
        p.longitude_deg,
        p.sign.sign.name(),
        p.formatted_degree(),
        if p.retrograde { "R" } else { "" },
        house
    )
}

pub fn print_positions(positions: &[Position], placements: Option<&[Placement]>) {
    for (i, p) in positions.iter().enumerate() {
        let house = placements.and_then(|pl| pl.get(i)).map(|pl| pl.house);
        println!("{}", position_row(p, house));
    }
}

pub fn print_houses(h: &HouseSet) {
    let note = if h.degraded {
        " (undefined angles: equal houses from 0° Aries)"
    } else {
        ""
    };
    println!("House system: {}{note}", h.system);
    println!("Ascendant:    {:>9.4}  {}", h.ascendant_deg, sign_position(h.ascendant_deg).formatted());
    println!("Midheaven:    {:>9.4}  {}", h.midheaven_deg, sign_position(h.midheaven_deg).formatted());
    println!("Descendant:   {:>9.4}", h.descendant_deg);
    println!("Imum Coeli:   {:>9.4}", h.imum_coeli_deg);
    for (i, &cusp) in h.cusps.iter().enumerate() {
        let house = (i + 1) as u8;
        println!(
            "{:>4}  {:>9.4}  {:<12} {}",
            ordinal(house.into()),
            cusp,
            sign_position(cusp).formatted(),
            house_name(house).unwrap_or_default()
        );
    }
}

pub fn aspect_row(a: &Aspect) -> String {
    format!(
        "{:<11} {} {:<11} {:<11} orb {:>5.2}{}",
        a.first.name(),
        a.aspect.symbol,
        a.second.name(),
        a.aspect.name(),
        a.orb_deg,
        if a.exact { "  exact" } else { "" }
    )
}

pub fn print_aspects(aspects: &[Aspect]) {
    if aspects.is_empty() {
        println!("(no aspects)");
        return;
    }
    for a in aspects {
        println!("{}", aspect_row(a));
    }
}

pub fn print_natal(c: &NatalChart) {
    println!("Time: {}  (JD {:.6})", c.time, c.jd_utc);
    println!(
        "Location: {:.4}, {:.4}",
        c.observer.latitude_deg, c.observer.longitude_deg
    );
    println!();
    print_houses(&c.houses);
    println!();
    println!("Positions:");
    print_positions(&c.positions, Some(&c.placements));
    println!();
    println!("Aspects:");
    print_aspects(&c.aspects);
}
