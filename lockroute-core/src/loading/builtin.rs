//! Built-in reference data: real French locks used when no live lock data
//! is available, and sample CEVNI signs.

use geo::Point;

use crate::model::{Lock, RiverSign, SignCategory};

/// id, name, lon, lat, ref, operator, opening hours
type LockRecord = (
    &'static str,
    &'static str,
    f64,
    f64,
    &'static str,
    &'static str,
    Option<&'static str>,
);

#[rustfmt::skip]
const BUILTIN_LOCKS: [LockRecord; 20] = [
    // Seine, Paris to Rouen
    ("mock-lock-001", "Écluse de Bougival", 2.1357, 48.8664, "SN-01", "VNF", None),
    ("mock-lock-002", "Écluse de Meulan", 1.9052, 49.0014, "SN-02", "VNF", None),
    ("mock-lock-003", "Écluse de Notre-Dame-de-la-Garenne", 1.6621, 49.1031, "SN-03", "VNF", None),
    ("mock-lock-004", "Écluse des Mureaux", 1.9187, 48.9951, "SN-04", "VNF", None),
    // Canal du Midi
    ("mock-lock-005", "Écluse de Fonserannes", 3.2056, 43.3492, "CM-01", "VNF", Some("Mo-Su 09:00-19:00")),
    ("mock-lock-006", "Écluse de Béziers", 3.2167, 43.3478, "CM-02", "VNF", None),
    ("mock-lock-007", "Écluse de Capestang", 3.0417, 43.3258, "CM-03", "VNF", None),
    // Rhône
    ("mock-lock-008", "Écluse de Génissiat", 5.7955, 46.0417, "RH-01", "CNR", None),
    ("mock-lock-009", "Écluse de Cusset", 4.8755, 45.7715, "RH-02", "CNR", None),
    ("mock-lock-010", "Écluse de Vaugris", 4.8528, 45.5208, "RH-03", "CNR", None),
    // Canal de Bourgogne
    ("mock-lock-011", "Écluse de Dijon", 5.0419, 47.3136, "CB-01", "VNF", None),
    ("mock-lock-012", "Écluse de Thorey", 5.1028, 47.2347, "CB-02", "VNF", None),
    // Loire
    ("mock-lock-013", "Écluse de Gien", 2.6274, 47.6797, "LO-01", "VNF", None),
    // Canal du Nivernais
    ("mock-lock-014", "Écluse de Cercy-la-Tour", 3.6410, 46.8647, "CN-01", "VNF", None),
    // Moselle
    ("mock-lock-015", "Écluse de Metz", 6.1756, 49.1194, "MO-01", "VNF", None),
    ("mock-lock-016", "Écluse de Toul", 5.8933, 48.6747, "MO-02", "VNF", None),
    // Garonne, canal latéral
    ("mock-lock-017", "Écluse de Castets-en-Dorthe", -0.0456, 44.5603, "GA-01", "VNF", None),
    ("mock-lock-018", "Écluse de Meilhan-sur-Garonne", -0.0947, 44.4717, "GA-02", "VNF", None),
    // Saône
    ("mock-lock-019", "Écluse de Gray", 5.5922, 47.4478, "SA-01", "VNF", None),
    ("mock-lock-020", "Écluse de Chalon-sur-Saône", 4.8556, 46.7797, "SA-02", "VNF", None),
];

/// id, code, name, description, category, lon, lat
type SignRecord = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    SignCategory,
    f64,
    f64,
);

#[rustfmt::skip]
const BUILTIN_SIGNS: [SignRecord; 13] = [
    ("sign-001", "A.1", "No entry", "Navigation prohibited for all vessels", SignCategory::Prohibition, 2.3522, 48.8566),
    ("sign-002", "A.9", "No overtaking", "Overtaking prohibited", SignCategory::Prohibition, 2.1200, 48.8600),
    ("sign-003", "A.10", "No passing", "Do not pass vessels going the other way", SignCategory::Prohibition, 4.8755, 45.7715),
    ("sign-004", "A.12", "Speed limit", "Maximum speed 8 km/h", SignCategory::Prohibition, 3.2100, 43.3450),
    ("sign-005", "B.1", "Keep starboard side", "Vessels must pass on the starboard (right) side", SignCategory::Obligation, 1.9052, 49.0014),
    ("sign-006", "B.2", "Keep port side", "Vessels must pass on the port (left) side", SignCategory::Obligation, 5.5922, 47.4478),
    ("sign-007", "B.4", "Sound horn", "Sound horn before proceeding", SignCategory::Obligation, 5.0419, 47.3136),
    ("sign-008", "C.1", "General hazard", "Danger ahead, proceed with caution", SignCategory::Warning, 5.7955, 46.0417),
    ("sign-009", "C.4", "Shallow water", "Shallow water ahead, minimum depth 1.2 m", SignCategory::Warning, 2.6274, 47.6797),
    ("sign-010", "C.5", "Low bridge", "Restricted overhead clearance, 3.5 m maximum", SignCategory::Warning, 3.0417, 43.3258),
    ("sign-011", "E.1", "Mooring permitted", "Mooring on this bank is permitted", SignCategory::Information, 4.8556, 46.7797),
    ("sign-012", "E.4.1", "Water point", "Fresh water available for vessels", SignCategory::Information, 6.1756, 49.1194),
    ("sign-013", "E.5", "Fuel station", "Diesel and/or petrol available", SignCategory::Information, -0.0456, 44.5603),
];

/// Fallback lock set: 20 locks across the main French waterways
pub fn builtin_locks() -> Vec<Lock> {
    BUILTIN_LOCKS
        .iter()
        .map(|&(id, name, lon, lat, lock_ref, operator, opening_hours)| Lock {
            id: id.to_string(),
            name: name.to_string(),
            coordinates: Point::new(lon, lat),
            lock_ref: Some(lock_ref.to_string()),
            operator: Some(operator.to_string()),
            opening_hours: opening_hours.map(str::to_string),
        })
        .collect()
}

pub fn builtin_signs() -> Vec<RiverSign> {
    BUILTIN_SIGNS
        .iter()
        .map(|&(id, code, name, description, category, lon, lat)| RiverSign {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            coordinates: Point::new(lon, lat),
            category,
            code: Some(code.to_string()),
        })
        .collect()
}
