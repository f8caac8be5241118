//! Prefecture coordinate lookup
//!
//! Maps each of the 47 prefecture names to its prefectural-office
//! coordinates, used as the fallback position for events without an explicit
//! coordinate pair.

/// Prefectural-office coordinates, `(name, latitude, longitude)`.
pub const PREFECTURE_COORDINATES: [(&str, f64, f64); 47] = [
    ("北海道", 43.0642, 141.3469),
    ("青森県", 40.8244, 140.7400),
    ("岩手県", 39.7036, 141.1525),
    ("宮城県", 38.2689, 140.8719),
    ("秋田県", 39.7186, 140.1025),
    ("山形県", 38.2406, 140.3633),
    ("福島県", 37.7500, 140.4678),
    ("茨城県", 36.3414, 140.4467),
    ("栃木県", 36.5658, 139.8836),
    ("群馬県", 36.3911, 139.0608),
    ("埼玉県", 35.8569, 139.6489),
    ("千葉県", 35.6047, 140.1233),
    ("東京都", 35.6894, 139.6917),
    ("神奈川県", 35.4478, 139.6425),
    ("新潟県", 37.9022, 139.0236),
    ("富山県", 36.6953, 137.2114),
    ("石川県", 36.5944, 136.6256),
    ("福井県", 36.0653, 136.2219),
    ("山梨県", 35.6639, 138.5683),
    ("長野県", 36.6514, 138.1811),
    ("岐阜県", 35.3911, 136.7222),
    ("静岡県", 34.9769, 138.3831),
    ("愛知県", 35.1803, 136.9067),
    ("三重県", 34.7303, 136.5086),
    ("滋賀県", 35.0044, 135.8683),
    ("京都府", 35.0214, 135.7556),
    ("大阪府", 34.6864, 135.5200),
    ("兵庫県", 34.6914, 135.1831),
    ("奈良県", 34.6853, 135.8328),
    ("和歌山県", 34.2261, 135.1675),
    ("鳥取県", 35.5036, 134.2383),
    ("島根県", 35.4722, 133.0506),
    ("岡山県", 34.6617, 133.9350),
    ("広島県", 34.3964, 132.4594),
    ("山口県", 34.1858, 131.4714),
    ("徳島県", 34.0658, 134.5594),
    ("香川県", 34.3403, 134.0433),
    ("愛媛県", 33.8417, 132.7661),
    ("高知県", 33.5597, 133.5311),
    ("福岡県", 33.6064, 130.4181),
    ("佐賀県", 33.2494, 130.2989),
    ("長崎県", 32.7447, 129.8736),
    ("熊本県", 32.7897, 130.7417),
    ("大分県", 33.2381, 131.6125),
    ("宮崎県", 31.9111, 131.4239),
    ("鹿児島県", 31.5603, 130.5581),
    ("沖縄県", 26.2125, 127.6811),
];

/// Look up the default coordinates for a prefecture by exact name.
///
/// Returns `None` for anything outside the 47 official names, including the
/// empty string; callers fall back to an explicit "not set" marker rather
/// than inventing a position.
pub fn prefecture_coordinates(name: &str) -> Option<(f64, f64)> {
    PREFECTURE_COORDINATES
        .iter()
        .find(|(pref, _, _)| *pref == name)
        .map(|(_, lat, lng)| (*lat, *lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_prefectures() {
        let (lat, lng) = prefecture_coordinates("東京都").unwrap();
        assert!((lat - 35.6894).abs() < 1e-6);
        assert!((lng - 139.6917).abs() < 1e-6);

        assert!(prefecture_coordinates("北海道").is_some());
        assert!(prefecture_coordinates("沖縄県").is_some());
    }

    #[test]
    fn test_lookup_unknown_names() {
        assert!(prefecture_coordinates("").is_none());
        assert!(prefecture_coordinates("東京").is_none());
        assert!(prefecture_coordinates("オンライン").is_none());
    }

    #[test]
    fn test_table_has_47_unique_entries() {
        let mut names: Vec<&str> = PREFECTURE_COORDINATES
            .iter()
            .map(|(name, _, _)| *name)
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 47);
    }
}
