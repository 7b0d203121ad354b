//! Named flower palettes and the experience → flower mapping.
//!
//! Both tables are plain immutable data owned by a [`Catalog`]; nothing here
//! is global. Role lookups never fail: a palette that lacks a role resolves
//! it through a fixed fallback chain so generators always get a non-empty
//! stop list for `petals` and `center`.

use crate::color::Rgb;
use crate::field::FlowerKind;

/// Semantic slot inside a palette.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Role {
    Petals,
    Center,
    Accent,
    Falls,
    Beard,
    Stem,
}

/// A named set of role → ordered RGB stop lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    roles: Vec<(Role, Vec<Rgb>)>,
}

impl Palette {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), roles: Vec::new() }
    }

    /// Adds (or replaces) a role. Channels are clamped to `[0, 1]`; an empty
    /// stop list is ignored.
    pub fn with_role(mut self, role: Role, stops: &[Rgb]) -> Self {
        if stops.is_empty() {
            return self;
        }
        let stops: Vec<Rgb> = stops
            .iter()
            .map(|c| [c[0].clamp(0.0, 1.0), c[1].clamp(0.0, 1.0), c[2].clamp(0.0, 1.0)])
            .collect();

        match self.roles.iter_mut().find(|(r, _)| *r == role) {
            Some(slot) => slot.1 = stops,
            None => self.roles.push((role, stops)),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stops for `role` exactly as defined, without fallback.
    pub fn stops(&self, role: Role) -> Option<&[Rgb]> {
        self.roles
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, stops)| stops.as_slice())
    }

    /// Petal stops; falls back to `falls`, then to the first defined role.
    pub fn petals(&self) -> &[Rgb] {
        self.first_of(&[Role::Petals, Role::Falls])
    }

    /// Center stops; falls back to `beard`, `accent`, then `petals`.
    pub fn center(&self) -> &[Rgb] {
        self.first_of(&[Role::Center, Role::Beard, Role::Accent, Role::Petals])
    }

    fn first_of(&self, chain: &[Role]) -> &[Rgb] {
        chain
            .iter()
            .find_map(|&role| self.stops(role))
            .or_else(|| self.roles.first().map(|(_, s)| s.as_slice()))
            .unwrap_or(&FALLBACK_STOPS)
    }
}

/// Used only by a palette built with no roles at all.
const FALLBACK_STOPS: [Rgb; 1] = [[1.0, 1.0, 1.0]];

// ── palette table ─────────────────────────────────────────────────────────

/// Lookup table of palettes keyed by flower name.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteTable {
    palettes: Vec<Palette>,
}

impl PaletteTable {
    pub fn new(palettes: Vec<Palette>) -> Self {
        Self { palettes }
    }

    /// The ten built-in flower palettes.
    pub fn builtin() -> Self {
        use Role::*;

        Self::new(vec![
            Palette::new("rose")
                .with_role(Petals, &[[1.0, 0.09, 0.27], [1.0, 0.27, 0.41], [1.0, 0.42, 0.54], [1.0, 0.56, 0.64], [1.0, 0.70, 0.76]])
                .with_role(Center, &[[0.55, 0.0, 0.0], [0.65, 0.16, 0.16]]),
            Palette::new("sunflower")
                .with_role(Petals, &[[1.0, 0.76, 0.03], [1.0, 0.79, 0.16], [1.0, 0.84, 0.31], [1.0, 0.88, 0.51]])
                .with_role(Center, &[[0.31, 0.20, 0.18], [0.36, 0.25, 0.22], [0.43, 0.30, 0.25]]),
            Palette::new("lotus")
                .with_role(Petals, &[[0.97, 0.73, 0.85], [0.96, 0.56, 0.69], [0.94, 0.38, 0.57], [0.93, 0.25, 0.48]])
                .with_role(Center, &[[1.0, 0.92, 0.23], [1.0, 0.95, 0.46]]),
            Palette::new("dahlia")
                .with_role(Petals, &[[0.61, 0.15, 0.69], [0.67, 0.28, 0.74], [0.73, 0.41, 0.78], [0.81, 0.58, 0.85], [0.88, 0.75, 0.91]])
                .with_role(Center, &[[1.0, 0.44, 0.0], [1.0, 0.56, 0.0]]),
            Palette::new("orchid")
                .with_role(Petals, &[[0.48, 0.12, 0.64], [0.56, 0.14, 0.67], [0.61, 0.15, 0.69], [0.67, 0.28, 0.74]])
                .with_role(Accent, &[[0.91, 0.12, 0.39], [0.94, 0.38, 0.57]])
                .with_role(Center, &[[1.0, 0.92, 0.23]]),
            Palette::new("cherry")
                .with_role(Petals, &[[1.0, 0.80, 0.82], [0.97, 0.73, 0.85], [0.99, 0.89, 0.93], [1.0, 0.94, 0.96]])
                .with_role(Center, &[[1.0, 0.92, 0.23], [0.91, 0.12, 0.39]]),
            Palette::new("iris")
                .with_role(Petals, &[[0.25, 0.32, 0.71], [0.36, 0.42, 0.75], [0.47, 0.53, 0.80], [0.62, 0.66, 0.86]])
                .with_role(Falls, &[[0.10, 0.14, 0.49], [0.16, 0.22, 0.58], [0.19, 0.25, 0.62]])
                .with_role(Beard, &[[1.0, 0.92, 0.23], [1.0, 0.76, 0.03]]),
            Palette::new("peony")
                .with_role(Petals, &[[0.96, 0.56, 0.69], [0.94, 0.38, 0.57], [0.93, 0.25, 0.48], [0.91, 0.12, 0.39], [0.85, 0.11, 0.37]])
                .with_role(Center, &[[1.0, 0.92, 0.23]]),
            Palette::new("tulip")
                .with_role(Petals, &[[0.90, 0.22, 0.21], [0.94, 0.33, 0.31], [0.96, 0.26, 0.21], [0.90, 0.45, 0.45]])
                .with_role(Center, &[[0.18, 0.49, 0.20], [0.22, 0.56, 0.24]]),
            Palette::new("lavender")
                .with_role(Petals, &[[0.49, 0.30, 1.0], [0.70, 0.53, 1.0], [0.59, 0.46, 0.80], [0.40, 0.23, 0.71]])
                .with_role(Stem, &[[0.18, 0.49, 0.20], [0.26, 0.63, 0.28]]),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.name == name)
    }

    /// Like [`get`](Self::get) but falls back to the lotus palette.
    ///
    /// `None` only when the table holds neither.
    pub fn resolve(&self, name: &str) -> Option<&Palette> {
        self.get(name).or_else(|| {
            log::debug!("no palette named '{name}', using lotus");
            self.get(FlowerKind::Lotus.name())
        })
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

impl Default for PaletteTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ── experience map ────────────────────────────────────────────────────────

/// Maps caller-side experience identifiers to a flower.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceMap {
    entries: Vec<(String, FlowerKind)>,
    default: FlowerKind,
}

impl ExperienceMap {
    pub fn new(default: FlowerKind) -> Self {
        Self { entries: Vec::new(), default }
    }

    pub fn with(mut self, experience: impl Into<String>, flower: FlowerKind) -> Self {
        self.entries.push((experience.into(), flower));
        self
    }

    pub fn builtin() -> Self {
        use FlowerKind::*;

        Self::new(Lotus)
            .with("default", Lotus)
            .with("lapis", Iris)
            .with("walmart", Sunflower)
            .with("columbia", Rose)
            .with("inquirer", Dahlia)
            .with("amfam", Cherry)
            .with("mindgram", Orchid)
            .with("umich", Peony)
            .with("stellenbosch", Lavender)
            .with("aaa", Tulip)
    }

    pub fn default_flower(&self) -> FlowerKind {
        self.default
    }

    /// Resolves an experience id, or a flower name used directly.
    ///
    /// Unrecognized identifiers resolve to the default flower.
    pub fn flower_for(&self, id: &str) -> FlowerKind {
        let id = id.trim();
        if let Some((_, kind)) = self.entries.iter().find(|(e, _)| e.eq_ignore_ascii_case(id)) {
            return *kind;
        }
        if let Some(kind) = FlowerKind::from_name(id) {
            return kind;
        }
        log::debug!("unknown experience '{id}', using {}", self.default.name());
        self.default
    }
}

impl Default for ExperienceMap {
    fn default() -> Self {
        Self::builtin()
    }
}

// ── catalog ───────────────────────────────────────────────────────────────

/// Immutable generator configuration: palettes plus the experience map.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub palettes: PaletteTable,
    pub experiences: ExperienceMap,
    fallback: Palette,
}

impl Catalog {
    pub fn new(palettes: PaletteTable, experiences: ExperienceMap) -> Self {
        let fallback = PaletteTable::builtin()
            .get(FlowerKind::Lotus.name())
            .cloned()
            .unwrap_or_else(|| Palette::new("lotus"));
        Self { palettes, experiences, fallback }
    }

    pub fn builtin() -> Self {
        Self::new(PaletteTable::builtin(), ExperienceMap::builtin())
    }

    /// Palette for `kind`, or the built-in lotus palette when the table has
    /// no entry for it.
    pub fn palette_for(&self, kind: FlowerKind) -> &Palette {
        self.palettes.resolve(kind.name()).unwrap_or(&self.fallback)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_every_flower() {
        let table = PaletteTable::builtin();
        assert_eq!(table.len(), FlowerKind::ALL.len());
        for kind in FlowerKind::ALL {
            assert!(table.get(kind.name()).is_some(), "missing palette {}", kind.name());
        }
    }

    #[test]
    fn every_palette_resolves_petals_and_center() {
        let table = PaletteTable::builtin();
        for kind in FlowerKind::ALL {
            let p = table.get(kind.name()).unwrap();
            assert!(!p.petals().is_empty());
            assert!(!p.center().is_empty());
        }
    }

    #[test]
    fn iris_center_falls_back_to_beard() {
        let table = PaletteTable::builtin();
        let iris = table.get("iris").unwrap();
        assert!(iris.stops(Role::Center).is_none());
        assert_eq!(iris.center(), iris.stops(Role::Beard).unwrap());
    }

    #[test]
    fn lavender_center_falls_back_to_petals() {
        let table = PaletteTable::builtin();
        let lavender = table.get("lavender").unwrap();
        assert_eq!(lavender.center(), lavender.petals());
        assert!(lavender.stops(Role::Stem).is_some());
    }

    #[test]
    fn with_role_clamps_and_replaces() {
        let p = Palette::new("x")
            .with_role(Role::Petals, &[[2.0, -1.0, 0.5]])
            .with_role(Role::Petals, &[[0.1, 0.2, 0.3]]);
        assert_eq!(p.petals(), &[[0.1, 0.2, 0.3]]);

        let clamped = Palette::new("y").with_role(Role::Center, &[[2.0, -1.0, 0.5]]);
        assert_eq!(clamped.center(), &[[1.0, 0.0, 0.5]]);
    }

    #[test]
    fn empty_palette_still_resolves() {
        let p = Palette::new("empty");
        assert_eq!(p.petals().len(), 1);
        assert_eq!(p.center().len(), 1);
    }

    // ── experiences ───────────────────────────────────────────────────────

    #[test]
    fn experiences_map_to_flowers() {
        let map = ExperienceMap::builtin();
        assert_eq!(map.flower_for("lapis"), FlowerKind::Iris);
        assert_eq!(map.flower_for("columbia"), FlowerKind::Rose);
        assert_eq!(map.flower_for("stellenbosch"), FlowerKind::Lavender);
        assert_eq!(map.flower_for("default"), FlowerKind::Lotus);
    }

    #[test]
    fn flower_names_are_accepted_directly() {
        assert_eq!(ExperienceMap::builtin().flower_for("tulip"), FlowerKind::Tulip);
    }

    #[test]
    fn unknown_experience_uses_default() {
        let map = ExperienceMap::builtin();
        assert_eq!(map.flower_for("nowhere"), FlowerKind::Lotus);
        assert_eq!(map.flower_for(""), FlowerKind::Lotus);
    }

    #[test]
    fn resolve_prefers_exact_then_lotus() {
        let table = PaletteTable::builtin();
        assert_eq!(table.resolve("rose").map(Palette::name), Some("rose"));
        assert_eq!(table.resolve("fern").map(Palette::name), Some("lotus"));
        assert!(PaletteTable::new(Vec::new()).resolve("fern").is_none());
    }

    #[test]
    fn catalog_falls_back_to_lotus_palette() {
        let catalog = Catalog::new(PaletteTable::new(Vec::new()), ExperienceMap::builtin());
        assert_eq!(catalog.palette_for(FlowerKind::Dahlia).name(), "lotus");
    }
}
