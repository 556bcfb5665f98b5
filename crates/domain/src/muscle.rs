use std::collections::BTreeMap;

/// Anatomical region of the body map.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Region {
    Chest,
    Abs,
    ShouldersFront,
    ShouldersBack,
    Traps,
    Biceps,
    Triceps,
    ForearmsFront,
    ForearmsBack,
    Lats,
    UpperBack,
    LowerBack,
    Glutes,
    Quads,
    Hamstrings,
    CalvesFront,
    CalvesBack,
}

impl Region {
    #[must_use]
    pub fn iter() -> std::slice::Iter<'static, Region> {
        static REGIONS: [Region; 17] = [
            Region::Chest,
            Region::Abs,
            Region::ShouldersFront,
            Region::ShouldersBack,
            Region::Traps,
            Region::Biceps,
            Region::Triceps,
            Region::ForearmsFront,
            Region::ForearmsBack,
            Region::Lats,
            Region::UpperBack,
            Region::LowerBack,
            Region::Glutes,
            Region::Quads,
            Region::Hamstrings,
            Region::CalvesFront,
            Region::CalvesBack,
        ];
        REGIONS.iter()
    }

    /// Element ID of the region in the body graphic.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Region::Chest => "chest",
            Region::Abs => "abs",
            Region::ShouldersFront => "shoulders_front",
            Region::ShouldersBack => "shoulders_back",
            Region::Traps => "traps",
            Region::Biceps => "biceps",
            Region::Triceps => "triceps",
            Region::ForearmsFront => "forearms_front",
            Region::ForearmsBack => "forearms_back",
            Region::Lats => "lats",
            Region::UpperBack => "upper_back",
            Region::LowerBack => "lower_back",
            Region::Glutes => "glutes",
            Region::Quads => "quads",
            Region::Hamstrings => "hamstrings",
            Region::CalvesFront => "calves_front",
            Region::CalvesBack => "calves_back",
        }
    }
}

/// Regions trained by a muscle group tag.
///
/// Unknown tags train no region.
#[must_use]
pub fn regions(tag: &str) -> &'static [Region] {
    match tag {
        "Peito" => &[Region::Chest],
        "Abdômen" => &[Region::Abs],
        "Ombros" => &[Region::ShouldersFront, Region::ShouldersBack],
        "Trapézio" => &[Region::Traps],
        "Bíceps" => &[Region::Biceps],
        "Tríceps" => &[Region::Triceps],
        "Antebraço" => &[Region::ForearmsFront, Region::ForearmsBack],
        "Costas" => &[
            Region::Lats,
            Region::UpperBack,
            Region::LowerBack,
            Region::Traps,
        ],
        "Lombar" => &[Region::LowerBack],
        "Glúteos" => &[Region::Glutes],
        "Quadríceps" => &[Region::Quads],
        "Isquiotibiais" => &[Region::Hamstrings],
        "Panturrilhas" => &[Region::CalvesFront, Region::CalvesBack],
        "Pernas" => &[
            Region::Quads,
            Region::Hamstrings,
            Region::CalvesFront,
            Region::CalvesBack,
            Region::Glutes,
        ],
        _ => &[],
    }
}

/// Opacity of regions that were not trained.
pub const UNTRAINED_OPACITY: f32 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct RegionHighlight {
    pub tag: String,
    pub count: u32,
    pub intensity: f32,
}

impl RegionHighlight {
    #[must_use]
    pub fn title(&self) -> String {
        format!("{}: {} treino(s)", self.tag, self.count)
    }
}

/// Training intensity per body region derived from muscle group frequencies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MuscleMap {
    max_count: u32,
    regions: BTreeMap<Region, (String, u32)>,
}

impl MuscleMap {
    #[must_use]
    pub fn new(frequency: &BTreeMap<String, u32>) -> Self {
        let mut regions = BTreeMap::<Region, (String, u32)>::new();

        for (tag, count) in frequency {
            for region in self::regions(tag) {
                match regions.get(region) {
                    Some((_, c)) if c >= count => {}
                    _ => {
                        regions.insert(*region, (tag.clone(), *count));
                    }
                }
            }
        }

        Self {
            max_count: frequency.values().copied().max().unwrap_or(0).max(1),
            regions,
        }
    }

    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn region(&self, region: Region) -> Option<RegionHighlight> {
        self.regions
            .get(&region)
            .map(|(tag, count)| RegionHighlight {
                tag: tag.clone(),
                count: *count,
                intensity: 0.2 + 0.8 * (*count as f32 / self.max_count as f32),
            })
    }

    /// Opacity to render the region with.
    #[must_use]
    pub fn opacity(&self, region: Region) -> f32 {
        self.region(region)
            .map_or(UNTRAINED_OPACITY, |highlight| highlight.intensity)
    }
}
