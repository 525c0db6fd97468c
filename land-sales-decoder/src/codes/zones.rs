//! Land-zone codes
//!
//! Single letters are the zoning codes used before the standard instrument;
//! the two and three character codes are the standard instrument zones.

pub(crate) const ZONES: &[(&str, &str)] = &[
    ("A", "Residential"),
    ("B", "Business"),
    ("C", "Sydney Commercial / Business"),
    ("D", "10(a) Sustainable Mixed Use Development"),
    ("E", "Employment"),
    ("I", "Industrial"),
    ("M", "9(a)(Mixed Residential / Business)"),
    ("N", "National Parks"),
    ("O", "Open Space"),
    ("P", "Protection"),
    ("R", "Non-Urban"),
    ("S", "Special Uses"),
    ("T", "North Sydney Commercial / Business"),
    ("U", "Community Uses"),
    ("V", "Comprehensive Centre"),
    ("W", "Reserve Open Space"),
    ("X", "Reserved Roads"),
    ("Y", "Reserved Special Uses"),
    ("Z", "Undetermined or Village"),
    ("RU1", "Primary Production"),
    ("RU2", "Rural Landscape"),
    ("RU3", "Forestry"),
    ("RU4", "Rural Small Holdings"),
    ("RU5", "Village"),
    ("RU6", "Transition"),
    ("R1", "General Residential"),
    ("R2", "Low Density Residential"),
    ("R3", "Medium Density Residential"),
    ("R4", "High Density Residential"),
    ("R5", "Large Lot Residential"),
    ("B1", "Neighbourhood Centre"),
    ("B2", "Local Centre"),
    ("B3", "Commercial Core"),
    ("B4", "Mixed Use"),
    ("B5", "Business Development"),
    ("B6", "Enterprise Corridor"),
    ("B7", "Business Park"),
    ("IN1", "General Industrial"),
    ("IN2", "Light Industrial"),
    ("IN3", "Heavy Industrial"),
    ("IN4", "Working Waterfront"),
    ("SP1", "Special Activities"),
    ("RE1", "Public Recreation"),
    ("RE2", "Private Recreation"),
    ("E1", "National Parks and Nature"),
    ("E2", "Environmental Conservation"),
    ("E3", "Environmental Management"),
    ("E4", "Environmental Living"),
    ("W1", "Natural Waterways"),
    ("W2", "Recreational Waterways"),
    ("W3", "Working Waterways"),
];
