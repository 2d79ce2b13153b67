//! Translation from an [`ItemFilter`] to SQL.
//!
//! These functions only build queries, they never touch the pool, so the
//! generated SQL is unit-testable without a database. All read paths share
//! one SELECT that joins the type, location and user names eagerly.

use sqlx::{Postgres, QueryBuilder};

use crate::features::inventory::dtos::ItemFilter;

const ITEM_SELECT: &str = r#"
SELECT i.id, i.barcode, i.serial_number, i.item_type_id, i.location_id, i.name,
       i.description, i.custom_fields, i.status, i.purchase_date, i.purchase_price,
       i.created_by, i.updated_by, i.created_at, i.updated_at,
       t.name AS item_type_name, l.name AS location_name,
       cu.name AS created_by_name, uu.name AS updated_by_name
FROM inventory_items i
JOIN item_types t ON t.id = i.item_type_id
JOIN locations l ON l.id = i.location_id
JOIN users cu ON cu.id = i.created_by
LEFT JOIN users uu ON uu.id = i.updated_by"#;

const ORDER_BY: &str = " ORDER BY i.created_at DESC, i.id DESC";

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Append the WHERE clause for `filter` to `qb`.
///
/// `search` is a case-insensitive substring disjunction over the item name,
/// barcode, serial number, type name and location name; `type`, `location`
/// and `status` are equality conditions AND'd with it.
fn apply_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &ItemFilter) {
    let mut sep = " WHERE ";

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(sep);
        sep = " AND ";
        qb.push("(i.name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR i.barcode ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR i.serial_number ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR t.name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR l.name ILIKE ");
        qb.push_bind(pattern);
        qb.push(" ESCAPE '\\')");
    }

    if let Some(item_type) = filter.item_type {
        qb.push(sep);
        sep = " AND ";
        qb.push("i.item_type_id = ");
        qb.push_bind(item_type);
    }

    if let Some(location) = filter.location {
        qb.push(sep);
        sep = " AND ";
        qb.push("i.location_id = ");
        qb.push_bind(location);
    }

    if let Some(status) = filter.status {
        qb.push(sep);
        qb.push("i.status = ");
        qb.push_bind(status);
    }
}

/// One page of items, most recent first.
pub fn build_list_query(
    filter: &ItemFilter,
    limit: i64,
    offset: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(ITEM_SELECT);
    apply_filter(&mut qb, filter);
    qb.push(ORDER_BY);
    qb.push(" LIMIT ");
    qb.push_bind(limit);
    qb.push(" OFFSET ");
    qb.push_bind(offset);
    qb
}

/// Total row count for the same filter.
pub fn build_count_query(filter: &ItemFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT COUNT(*) FROM inventory_items i \
         JOIN item_types t ON t.id = i.item_type_id \
         JOIN locations l ON l.id = i.location_id",
    );
    apply_filter(&mut qb, filter);
    qb
}

/// Every matching row, unpaginated, for the CSV export.
pub fn build_export_query(filter: &ItemFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(ITEM_SELECT);
    apply_filter(&mut qb, filter);
    qb.push(ORDER_BY);
    qb
}

/// Single item by id, same joined shape as the list.
pub fn build_get_query(id: i64) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(ITEM_SELECT);
    qb.push(" WHERE i.id = ");
    qb.push_bind(id);
    qb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::inventory::models::ItemStatus;

    #[test]
    fn unfiltered_list_has_no_where_clause() {
        let sql = build_list_query(&ItemFilter::default(), 10, 0).into_sql();
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains("ORDER BY i.created_at DESC, i.id DESC"));
        assert!(sql.ends_with("LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn search_expands_to_five_way_disjunction() {
        let filter = ItemFilter {
            search: Some("laptop".to_string()),
            ..Default::default()
        };
        let sql = build_list_query(&filter, 10, 0).into_sql();
        assert!(sql.contains("(i.name ILIKE $1"));
        assert!(sql.contains("i.barcode ILIKE $2"));
        assert!(sql.contains("i.serial_number ILIKE $3"));
        assert!(sql.contains("t.name ILIKE $4"));
        assert!(sql.contains("l.name ILIKE $5"));
        assert_eq!(sql.matches(" OR ").count(), 4);
    }

    #[test]
    fn empty_search_is_ignored() {
        let filter = ItemFilter {
            search: Some(String::new()),
            ..Default::default()
        };
        let sql = build_count_query(&filter).into_sql();
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn equality_filters_are_anded_together() {
        let filter = ItemFilter {
            search: Some("hp".to_string()),
            item_type: Some(3),
            location: Some(7),
            status: Some(ItemStatus::Maintenance),
        };
        let sql = build_list_query(&filter, 10, 20).into_sql();
        assert!(sql.contains("i.item_type_id = $6"));
        assert!(sql.contains("i.location_id = $7"));
        assert!(sql.contains("i.status = $8"));
        assert_eq!(sql.matches(" AND ").count(), 3);
        assert!(sql.ends_with("LIMIT $9 OFFSET $10"));
    }

    #[test]
    fn count_query_carries_the_same_filter_without_ordering() {
        let filter = ItemFilter {
            status: Some(ItemStatus::Active),
            ..Default::default()
        };
        let sql = build_count_query(&filter).into_sql();
        assert!(sql.starts_with("SELECT COUNT(*)"));
        assert!(sql.contains("i.status = $1"));
        assert!(!sql.contains("ORDER BY"));
        assert!(!sql.contains("LIMIT"));
    }

    #[test]
    fn export_query_is_ordered_but_unpaginated() {
        let sql = build_export_query(&ItemFilter::default()).into_sql();
        assert!(sql.ends_with("ORDER BY i.created_at DESC, i.id DESC"));
        assert!(!sql.contains("LIMIT"));
    }

    #[test]
    fn like_wildcards_match_literally() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\dir"), "c:\\\\dir");
        assert_eq!(escape_like("plain"), "plain");
    }
}
