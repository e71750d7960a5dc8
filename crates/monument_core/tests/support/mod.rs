use monument_core::{Condition, CoordinateSet, Delta, Gauss, NewMonument, Utm, Wgs84};

/// Builds a registration input whose coordinate text is derived from `seed`.
pub fn new_monument(name: &str, seed: u32) -> NewMonument {
    NewMonument {
        monument_name: name.to_string(),
        topo: format!("26{seed:02}"),
        condition: Condition::Good,
        monument_image: format!("https://images.example.org/{seed}.jpg"),
        coordinates: CoordinateSet {
            gauss: Gauss {
                gauss_lo: "29".to_string(),
                gauss_x: format!("2881{seed:03}.51"),
                gauss_y: format!("-31{seed:03}.20"),
            },
            wgs84: Wgs84 {
                wgs84_lat: format!("-26.{seed:04}"),
                wgs84_lon: format!("28.{seed:04}"),
            },
            utm: Utm {
                utm_cm: "27".to_string(),
                utm_north: format!("7119{seed:03}.1"),
                utm_east: format!("631{seed:03}.4"),
            },
            delta: Delta {
                delta_lat: "0.0001".to_string(),
                delta_lon: "-0.0002".to_string(),
                delta_x: format!("{seed}.5"),
                delta_y: "2.25".to_string(),
                delta_e: "-1.0".to_string(),
                delta_n: "0".to_string(),
            },
        },
    }
}
