//! Bridges user intents to the remote API and store transitions.
//!
//! Each operation performs exactly one HTTP call and exactly one store
//! transition on completion. `load` absorbs its failure into store state so
//! list and dashboard views render purely from the store; the mutation
//! operations leave the store untouched on failure and hand the message
//! back to the caller, so an open form can show it and keep its input.

use api_types::bill::BillDraft;

use crate::{client::Client, store::BillsStore};

/// Reloads the whole collection. Never fails toward the caller.
pub async fn load(client: &Client, store: &mut BillsStore, token: &str) {
    store.fetch_start();
    match client.bills_list(token).await {
        Ok(bills) => {
            tracing::debug!(count = bills.len(), "bills loaded");
            store.fetch_success(bills);
        }
        Err(err) => store.fetch_failure(err.message()),
    }
}

/// Creates a bill and appends the server's version of it.
pub async fn create(
    client: &Client,
    store: &mut BillsStore,
    token: &str,
    draft: &BillDraft,
) -> Result<(), String> {
    match client.bill_create(token, draft).await {
        Ok(bill) => {
            store.add(bill);
            Ok(())
        }
        Err(err) => Err(err.message()),
    }
}

/// Updates a bill in place with the server's version of it.
pub async fn edit(
    client: &Client,
    store: &mut BillsStore,
    token: &str,
    id: i64,
    draft: &BillDraft,
) -> Result<(), String> {
    match client.bill_update(token, id, draft).await {
        Ok(bill) => {
            store.update(bill);
            Ok(())
        }
        Err(err) => Err(err.message()),
    }
}

/// Deletes a bill and drops it from the collection.
pub async fn remove(
    client: &Client,
    store: &mut BillsStore,
    token: &str,
    id: i64,
) -> Result<(), String> {
    match client.bill_delete(token, id).await {
        Ok(()) => {
            store.remove(id);
            Ok(())
        }
        Err(err) => Err(err.message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::bill::{Bill, BillCategory, BillStatus};
    use axum::{
        Json, Router,
        extract::Path,
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Response},
        routing::{delete, get, post, put},
    };
    use chrono::NaiveDate;
    use serde_json::json;

    const TOKEN: &str = "test-token";

    fn bill(id: i64, title: &str, amount: f64) -> Bill {
        let due = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Bill {
            id,
            title: title.to_string(),
            description: None,
            amount,
            due_date: due,
            status: BillStatus::Pending,
            category: BillCategory::Utilities,
            created_at: due,
            user_id: 1,
        }
    }

    fn draft(title: &str, amount: f64) -> BillDraft {
        BillDraft {
            title: title.to_string(),
            description: None,
            amount,
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            category: BillCategory::Utilities,
        }
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            == Some("Bearer test-token")
    }

    fn unauthorized() -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Could not validate credentials" })),
        )
            .into_response()
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn load_replaces_store_wholesale() {
        let router = Router::new().route(
            "/bills/",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return unauthorized();
                }
                Json(vec![bill(1, "Rent", 1200.0), bill(2, "Power", 80.0)]).into_response()
            }),
        );
        let base_url = serve(router).await;
        let client = Client::new(&base_url).unwrap();

        let mut store = BillsStore::new();
        store.add(bill(9, "Stale", 1.0));
        load(&client, &mut store, TOKEN).await;

        assert!(store.error().is_none());
        assert!(!store.is_loading());
        let ids: Vec<i64> = store.bills().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn load_failure_uses_detail_and_keeps_stale_bills() {
        let router = Router::new().route(
            "/bills/",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Database offline" })),
                )
            }),
        );
        let base_url = serve(router).await;
        let client = Client::new(&base_url).unwrap();

        let mut store = BillsStore::new();
        store.add(bill(1, "Rent", 1200.0));
        load(&client, &mut store, TOKEN).await;

        assert_eq!(store.error(), Some("Database offline"));
        assert!(!store.is_loading());
        assert_eq!(store.bills().len(), 1);
    }

    #[tokio::test]
    async fn load_rejected_token_surfaces_server_detail() {
        let router = Router::new().route("/bills/", get(|| async { unauthorized() }));
        let base_url = serve(router).await;
        let client = Client::new(&base_url).unwrap();

        let mut store = BillsStore::new();
        load(&client, &mut store, "expired").await;

        assert_eq!(store.error(), Some("Could not validate credentials"));
    }

    #[tokio::test]
    async fn load_transport_failure_maps_to_generic_message() {
        // Nothing listens here.
        let client = Client::new("http://127.0.0.1:1").unwrap();

        let mut store = BillsStore::new();
        load(&client, &mut store, TOKEN).await;

        assert_eq!(store.error(), Some("Server unreachable."));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn load_decode_failure_maps_to_response_message() {
        // 2xx body that is not a bill list.
        let router = Router::new().route(
            "/bills/",
            get(|| async { Json(json!({ "unexpected": "shape" })) }),
        );
        let base_url = serve(router).await;
        let client = Client::new(&base_url).unwrap();

        let mut store = BillsStore::new();
        store.add(bill(1, "Rent", 1200.0));
        load(&client, &mut store, TOKEN).await;

        assert_eq!(store.error(), Some("Unexpected server response."));
        assert_eq!(store.bills().len(), 1);
    }

    #[tokio::test]
    async fn create_appends_server_bill() {
        let router = Router::new().route(
            "/bills/",
            post(|headers: HeaderMap, Json(draft): Json<BillDraft>| async move {
                if !authorized(&headers) {
                    return unauthorized();
                }
                let mut created = bill(2, &draft.title, draft.amount);
                created.category = draft.category;
                Json(created).into_response()
            }),
        );
        let base_url = serve(router).await;
        let client = Client::new(&base_url).unwrap();

        let mut store = BillsStore::new();
        store.add(bill(1, "Rent", 1200.0));

        let result = create(&client, &mut store, TOKEN, &draft("Power", 80.0)).await;

        assert!(result.is_ok());
        let ids: Vec<i64> = store.bills().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn create_failure_leaves_store_untouched() {
        let router = Router::new().route(
            "/bills/",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": "Amount must be positive" })),
                )
            }),
        );
        let base_url = serve(router).await;
        let client = Client::new(&base_url).unwrap();

        let mut store = BillsStore::new();
        store.add(bill(1, "Rent", 1200.0));

        let result = create(&client, &mut store, TOKEN, &draft("Power", -1.0)).await;

        assert_eq!(result.unwrap_err(), "Amount must be positive");
        assert_eq!(store.bills().len(), 1);
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn edit_replaces_bill_in_place() {
        let router = Router::new().route(
            "/bills/{id}",
            put(
                |Path(id): Path<i64>, Json(draft): Json<BillDraft>| async move {
                    Json(bill(id, &draft.title, draft.amount))
                },
            ),
        );
        let base_url = serve(router).await;
        let client = Client::new(&base_url).unwrap();

        let mut store = BillsStore::new();
        store.add(bill(1, "Rent", 1200.0));
        store.add(bill(2, "Power", 80.0));

        let result = edit(
            &client,
            &mut store,
            TOKEN,
            1,
            &draft("Rent (updated)", 1250.0),
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(store.bills()[0].title, "Rent (updated)");
        assert_eq!(store.bills()[1].id, 2);
    }

    #[tokio::test]
    async fn remove_drops_bill_on_success() {
        let router = Router::new().route(
            "/bills/{id}",
            delete(|Path(_id): Path<i64>| async { StatusCode::NO_CONTENT }),
        );
        let base_url = serve(router).await;
        let client = Client::new(&base_url).unwrap();

        let mut store = BillsStore::new();
        store.add(bill(1, "Rent", 1200.0));
        store.add(bill(2, "Power", 80.0));

        let result = remove(&client, &mut store, TOKEN, 1).await;

        assert!(result.is_ok());
        let ids: Vec<i64> = store.bills().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn remove_failure_surfaces_message_and_keeps_bill() {
        let router = Router::new().route(
            "/bills/{id}",
            delete(|Path(_id): Path<i64>| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "detail": "Bill not found" })),
                )
            }),
        );
        let base_url = serve(router).await;
        let client = Client::new(&base_url).unwrap();

        let mut store = BillsStore::new();
        store.add(bill(1, "Rent", 1200.0));

        let result = remove(&client, &mut store, TOKEN, 1).await;

        assert_eq!(result.unwrap_err(), "Bill not found");
        assert_eq!(store.bills().len(), 1);
    }
}
