use std::fmt;

/// One of the statically registered alert regions.
///
/// The table is compiled in; codes follow the `CC-NN` administrative form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Beijing,
    Shanghai,
    Guangzhou,
    Chengdu,
    Wuhan,
    Xian,
    Hangzhou,
}

impl Region {
    pub fn code(&self) -> &'static str {
        match self {
            Region::Beijing => "CN-11",
            Region::Shanghai => "CN-31",
            Region::Guangzhou => "CN-44",
            Region::Chengdu => "CN-51",
            Region::Wuhan => "CN-42",
            Region::Xian => "CN-61",
            Region::Hangzhou => "CN-33",
        }
    }

    /// Localized display name used in every alert message.
    pub fn name(&self) -> &'static str {
        match self {
            Region::Beijing => "北京",
            Region::Shanghai => "上海",
            Region::Guangzhou => "广州",
            Region::Chengdu => "成都",
            Region::Wuhan => "武汉",
            Region::Xian => "西安",
            Region::Hangzhou => "杭州",
        }
    }

    /// (latitude, longitude) of the region's reference city.
    pub fn coordinates(&self) -> (f64, f64) {
        match self {
            Region::Beijing => (39.9042, 116.4074),
            Region::Shanghai => (31.2304, 121.4737),
            Region::Guangzhou => (23.1291, 113.2644),
            Region::Chengdu => (30.5728, 104.0668),
            Region::Wuhan => (30.5928, 114.3055),
            Region::Xian => (34.3416, 108.9398),
            Region::Hangzhou => (30.2741, 120.1551),
        }
    }

    pub const fn all() -> &'static [Region] {
        &[
            Region::Beijing,
            Region::Shanghai,
            Region::Guangzhou,
            Region::Chengdu,
            Region::Wuhan,
            Region::Xian,
            Region::Hangzhou,
        ]
    }

    /// All registered codes, joined for user-facing error messages.
    pub fn supported_codes() -> String {
        Region::all().iter().map(Region::code).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Region {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Region::all()
            .iter()
            .find(|region| region.code() == value)
            .copied()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "错误：不支持的区域代码 {value}。支持的区域代码包括：{}",
                    Region::supported_codes()
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_code_roundtrip() {
        for region in Region::all() {
            let code = region.code();
            let parsed = Region::try_from(code).expect("roundtrip should succeed");
            assert_eq!(*region, parsed);
        }
    }

    #[test]
    fn display_matches_code() {
        assert_eq!(Region::Beijing.to_string(), "CN-11");
        assert_eq!(Region::Hangzhou.to_string(), "CN-33");
    }

    #[test]
    fn table_has_seven_entries() {
        assert_eq!(Region::all().len(), 7);
    }

    #[test]
    fn beijing_coordinates_match_defaults() {
        let (lat, lon) = Region::Beijing.coordinates();
        assert!((lat - crate::config::DEFAULT_LATITUDE).abs() < f64::EPSILON);
        assert!((lon - crate::config::DEFAULT_LONGITUDE).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_region_error_lists_every_code() {
        let err = Region::try_from("ZZ-99").unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("ZZ-99"));
        for region in Region::all() {
            assert!(msg.contains(region.code()), "missing {} in: {msg}", region.code());
        }
    }
}
