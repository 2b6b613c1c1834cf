use serde_json::{Value, json};

use crate::support::{TestApp, routes};

mod submit {
    use super::*;

    #[tokio::test]
    async fn valid_batch_is_fully_inserted_in_order() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(
                routes::UPLOAD_SCORES,
                &json!([
                    {"player_name": "Tom", "score": 120},
                    {"player_name": "Luna2", "score": -5},
                    {"player_name": "Mochi", "score": 9_000_000_000i64},
                ]),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.message(), "Scores submitted");
        let ids = res.ids();
        assert_eq!(ids.len(), 3);

        let listed = app.get(routes::SCORES).await;
        assert_eq!(listed.status, 200);
        let records = listed.records();
        assert_eq!(records.len(), 3);
        for (record, id) in records.iter().zip(&ids) {
            assert_eq!(record["_id"], json!(id));
        }
        assert_eq!(records[0]["player_name"], "Tom");
        assert_eq!(records[1]["score"], -5);
        assert_eq!(records[2]["score"], 9_000_000_000i64);
    }

    #[tokio::test]
    async fn one_invalid_name_rejects_the_whole_batch() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(
                routes::UPLOAD_SCORES,
                &json!([
                    {"player_name": "Tom", "score": 1},
                    {"player_name": "bad name!", "score": 2},
                    {"player_name": "Luna", "score": 3},
                ]),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(app.get(routes::SCORES).await.records().is_empty());
    }

    #[tokio::test]
    async fn injection_shaped_names_are_rejected() {
        let app = TestApp::spawn().await;

        for name in ["$where", "a.b", "{}", "", "tom_cat"] {
            let res = app
                .post_json(
                    routes::UPLOAD_SCORES,
                    &json!([{"player_name": name, "score": 1}]),
                )
                .await;
            assert_eq!(res.status, 400, "name {name:?} should be rejected");
        }
        assert!(app.get(routes::SCORES).await.records().is_empty());
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.post_json(routes::UPLOAD_SCORES, &json!([])).await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn malformed_entries_are_rejected() {
        let app = TestApp::spawn().await;

        let wrong_type = app
            .post_json(
                routes::UPLOAD_SCORES,
                &json!([{"player_name": "Tom", "score": "lots"}]),
            )
            .await;
        assert_eq!(wrong_type.status, 400);
        assert_eq!(wrong_type.body["code"], "VALIDATION_ERROR");

        let missing_field = app
            .post_json(routes::UPLOAD_SCORES, &json!([{"player_name": "Tom"}]))
            .await;
        assert_eq!(missing_field.status, 400);

        let not_json = app.post_raw(routes::UPLOAD_SCORES, "[{").await;
        assert_eq!(not_json.status, 400);
        assert_eq!(not_json.body["code"], "VALIDATION_ERROR");
    }
}

mod update {
    use super::*;

    async fn app_with_score() -> (TestApp, String) {
        let app = TestApp::spawn().await;
        let ids = app
            .submit_scores(&json!([{"player_name": "Tom", "score": 10}]))
            .await;
        (app, ids[0].clone())
    }

    async fn only_score(app: &TestApp) -> Value {
        let listed = app.get(routes::SCORES).await;
        assert_eq!(listed.records().len(), 1);
        listed.records()[0].clone()
    }

    #[tokio::test]
    async fn safe_update_is_applied() {
        let (app, id) = app_with_score().await;

        let res = app
            .put_json(&routes::score(&id), &json!({"score": 250, "level": "rooftops"}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.message(), "Score updated");
        let record = only_score(&app).await;
        assert_eq!(record["player_name"], "Tom");
        assert_eq!(record["score"], 250);
        assert_eq!(record["level"], "rooftops");
    }

    #[tokio::test]
    async fn unsafe_updates_are_rejected_and_leave_record_unchanged() {
        let (app, id) = app_with_score().await;
        let before = only_score(&app).await;

        let payloads = [
            json!({"$set": {"score": 1}}),
            json!({"stats.best": 1}),
            json!({"player_name": "$gt"}),
            json!({"player_name": "{evil}"}),
            json!({"note": "}"}),
            json!({"meta": {"$ne": null}}),
        ];
        for payload in payloads {
            let res = app.put_json(&routes::score(&id), &payload).await;
            assert_eq!(res.status, 400, "payload {payload} should be rejected");
            assert_eq!(res.body["code"], "UNSAFE_UPDATE");
            assert_eq!(res.message(), "Invalid or unsafe data");
        }

        assert_eq!(only_score(&app).await, before);
    }

    #[tokio::test]
    async fn dollar_in_non_string_values_is_irrelevant() {
        let (app, id) = app_with_score().await;

        let res = app
            .put_json(&routes::score(&id), &json!({"score": 99, "verified": true}))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(only_score(&app).await["score"], 99);
    }

    #[tokio::test]
    async fn unknown_id_is_acknowledged_without_change() {
        let (app, _) = app_with_score().await;
        let before = only_score(&app).await;
        let missing = common::DocumentId::generate().to_string();

        let res = app
            .put_json(&routes::score(&missing), &json!({"score": 1}))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(only_score(&app).await, before);
    }

    #[tokio::test]
    async fn identifier_cannot_be_rewritten() {
        let (app, id) = app_with_score().await;

        let res = app
            .put_json(&routes::score(&id), &json!({"_id": "other"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(only_score(&app).await["_id"], json!(id));
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn removes_score_and_tolerates_repeat() {
        let app = TestApp::spawn().await;
        let ids = app
            .submit_scores(&json!([
                {"player_name": "Tom", "score": 1},
                {"player_name": "Luna", "score": 2},
            ]))
            .await;

        let res = app.delete(&routes::score(&ids[0])).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.message(), "Score deleted");

        let again = app.delete(&routes::score(&ids[0])).await;
        assert_eq!(again.status, 200);
        assert_eq!(again.message(), "Score deleted");

        let listed = app.get(routes::SCORES).await;
        assert_eq!(listed.records().len(), 1);
        assert_eq!(listed.records()[0]["player_name"], "Luna");
    }

    #[tokio::test]
    async fn nonexistent_id_is_a_noop() {
        let app = TestApp::spawn().await;
        let missing = common::DocumentId::generate().to_string();

        let res = app.delete(&routes::score(&missing)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.message(), "Score deleted");
    }
}
