/// Location of a monitoring station in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationLocation {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const fn station(name: &'static str, latitude: f64, longitude: f64) -> StationLocation {
    StationLocation {
        name,
        latitude,
        longitude,
    }
}

/// The twelve national monitoring sites covered by the Beijing dataset.
pub const BEIJING_STATIONS: [StationLocation; 12] = [
    station("Aotizhongxin", 39.982, 116.397),
    station("Changping", 40.217, 116.230),
    station("Dingling", 40.292, 116.220),
    station("Dongsi", 39.929, 116.417),
    station("Guanyuan", 39.929, 116.339),
    station("Gucheng", 39.914, 116.184),
    station("Huairou", 40.328, 116.628),
    station("Nongzhanguan", 39.937, 116.461),
    station("Shunyi", 40.127, 116.655),
    station("Tiantan", 39.886, 116.407),
    station("Wanliu", 39.987, 116.287),
    station("Wanshouxigong", 39.878, 116.352),
];

/// Look up a station by exact name.
pub fn locate(name: &str) -> Option<&'static StationLocation> {
    BEIJING_STATIONS.iter().find(|s| s.name == name)
}
