//! Equipment Catalog
//!
//! Electrical receivers of the reference woodworking shop. The catalog only
//! fixes identity (id and name); every numeric parameter comes from the user.

use serde::Serialize;

use crate::calculations::load::EquipmentRow;

/// One receiver group of the reference shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EquipmentCategory {
    pub id: u32,
    pub name: &'static str,
}

/// Reference shop, in the order the rows are listed
pub const EQUIPMENT_CATALOG: [EquipmentCategory; 8] = [
    EquipmentCategory { id: 1, name: "Grinding machine" },
    EquipmentCategory { id: 2, name: "Drilling machine" },
    EquipmentCategory { id: 3, name: "Jointer" },
    EquipmentCategory { id: 4, name: "Circular saw" },
    EquipmentCategory { id: 5, name: "Press" },
    EquipmentCategory { id: 6, name: "Polishing machine" },
    EquipmentCategory { id: 7, name: "Milling machine" },
    EquipmentCategory { id: 8, name: "Fan" },
];

/// Find a catalog entry by id
pub fn by_id(id: u32) -> Option<&'static EquipmentCategory> {
    EQUIPMENT_CATALOG.iter().find(|c| c.id == id)
}

/// Blank form rows for every catalog entry
pub fn default_rows() -> Vec<EquipmentRow> {
    EQUIPMENT_CATALOG
        .iter()
        .map(|c| EquipmentRow::new(c.id, c.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_sequential() {
        for (index, category) in EQUIPMENT_CATALOG.iter().enumerate() {
            assert_eq!(category.id as usize, index + 1);
        }
    }

    #[test]
    fn test_by_id() {
        assert_eq!(by_id(4).unwrap().name, "Circular saw");
        assert!(by_id(9).is_none());
    }

    #[test]
    fn test_default_rows_are_blank() {
        let rows = default_rows();
        assert_eq!(rows.len(), EQUIPMENT_CATALOG.len());
        assert_eq!(rows[7].name, "Fan");
        assert!(rows.iter().all(|r| r.is_blank()));
    }
}
