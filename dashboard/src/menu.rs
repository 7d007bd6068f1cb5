//! Sidebar menu construction.

use std::collections::HashSet;

use common::models::MenuItem;
use tracing::warn;

/// Key of the static navigation group.
pub const NAVIGATION_KEY: &str = "sub1";

/// The static "Navigation" group, present on every page.
pub fn navigation_group() -> MenuItem {
    MenuItem::group(
        NAVIGATION_KEY,
        "Navigation",
        vec![MenuItem::leaf("g1", "Item 1"), MenuItem::leaf("g2", "Item 2")],
    )
}

/// Picks the database whose tables get their own menu group.
///
/// Only when the backend reports more than one database, and then always
/// the last one in backend order.
pub fn select_menu_database(databases: &[String]) -> Option<&str> {
    if databases.len() > 1 {
        databases.last().map(String::as_str)
    } else {
        None
    }
}

/// Builds the full sidebar menu.
///
/// `selected` is the database picked by [`select_menu_database`] together
/// with its tables.
pub fn build_menu(selected: Option<(&str, &[String])>) -> Vec<MenuItem> {
    let mut items = vec![navigation_group()];

    if let Some((database, tables)) = selected {
        warn_on_duplicates(database, tables);
        items.push(MenuItem::database(database, tables));
    }

    items
}

// Table names double as menu keys.
fn warn_on_duplicates(database: &str, tables: &[String]) {
    let mut seen = HashSet::with_capacity(tables.len());
    for table in tables {
        if !seen.insert(table.as_str()) {
            warn!(database, table = %table, "表名重复，菜单键不唯一");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_selection_for_zero_or_one_database() {
        assert_eq!(select_menu_database(&[]), None);
        assert_eq!(select_menu_database(&names(&["default_db"])), None);
    }

    #[test]
    fn test_last_database_is_selected() {
        assert_eq!(
            select_menu_database(&names(&["default_db", "db2"])),
            Some("db2")
        );
        // Backend order decides, not name order.
        assert_eq!(
            select_menu_database(&names(&["zeta", "alpha", "mid"])),
            Some("mid")
        );
    }

    #[test]
    fn test_menu_without_selection_is_navigation_only() {
        let menu = build_menu(None);
        assert_eq!(menu, vec![navigation_group()]);
        assert_eq!(menu[0].key, "sub1");
        let child_keys: Vec<_> = menu[0].children.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(child_keys, vec!["g1", "g2"]);
    }

    #[test]
    fn test_menu_with_selection_appends_database_group() {
        let tables = names(&["x"]);
        let menu = build_menu(Some(("db2", &tables)));

        assert_eq!(menu.len(), 2);
        assert_eq!(menu[1].key, "db2");
        assert_eq!(menu[1].label, "db2");
        assert_eq!(menu[1].children, vec![MenuItem::leaf("x", "x")]);
    }

    #[test]
    fn test_duplicate_tables_are_kept() {
        let tables = names(&["a", "a"]);
        let menu = build_menu(Some(("db2", &tables)));
        assert_eq!(menu[1].children.len(), 2);
    }

    #[test]
    fn test_build_is_deterministic() {
        let tables = names(&["b", "a", "c"]);
        assert_eq!(
            build_menu(Some(("db2", &tables))),
            build_menu(Some(("db2", &tables)))
        );
    }
}
