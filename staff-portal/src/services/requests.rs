//! Item requests

use crate::storage::Store;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Request, RequestForm, RequestStatus};

/// Submit a new request owned by `owner_email`
///
/// Rows with blank names are dropped; at least one named row must remain.
pub fn submit(
    store: &mut Store,
    owner_email: &str,
    form: &RequestForm,
    date: NaiveDate,
) -> AppResult<Request> {
    let kind = form.kind.trim();
    validate_required_text(kind, "Request type", MAX_SHORT_TEXT_LEN)?;

    let items = form.items();
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::RequestItemsRequired));
    }
    for item in &items {
        validate_optional_text(&item.name, "Item name", MAX_NAME_LEN)?;
    }

    let request = Request {
        id: store.next_id.request(),
        kind: kind.to_string(),
        items,
        status: RequestStatus::Pending,
        date,
        employee_email: owner_email.to_string(),
    };
    tracing::info!(
        request_id = request.id,
        items = request.items.len(),
        owner = %owner_email,
        "Request submitted"
    );
    store.requests.push(request.clone());
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::seeded;
    use shared::models::ItemRow;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_all_blank_items_rejected() {
        let (mut store, _) = seeded();
        let mut form = RequestForm::new("Equipment");
        form.push_row(ItemRow::new("   ", "3"));
        let err = submit(&mut store, "admin@example.com", &form, day()).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequestItemsRequired);
        assert_eq!(err.message, "Add at least one item.");
        assert!(store.requests.is_empty());
        assert_eq!(store.next_id.request, 1);
    }

    #[test]
    fn test_submit_pending_and_owned() {
        let (mut store, _) = seeded();
        let mut form = RequestForm::new("Equipment");
        form.row_mut(0).unwrap().name = "Laptop".into();
        form.push_row(ItemRow::new("Monitor", "2"));

        let req = submit(&mut store, "admin@example.com", &form, day()).unwrap();
        assert_eq!(req.id, 1);
        assert_eq!(req.status, RequestStatus::Pending);
        assert_eq!(req.date, day());
        assert_eq!(req.items.len(), 2);
        assert_eq!(req.items[1].qty, 2);

        assert_eq!(store.requests_for("admin@example.com").count(), 1);
        assert_eq!(store.requests_for("ada@example.com").count(), 0);
    }

    #[test]
    fn test_type_required() {
        let (mut store, _) = seeded();
        let mut form = RequestForm::new("  ");
        form.row_mut(0).unwrap().name = "Laptop".into();
        assert_eq!(
            submit(&mut store, "admin@example.com", &form, day())
                .unwrap_err()
                .code,
            ErrorCode::RequiredField
        );
    }
}
