//! Response table

use crate::models::{NewResponse, ResponsePatch, ResponseRecord};
use crate::repository::entity::{Entity, Repository, Value};

/// The `responses` table
pub struct Responses;

pub type ResponseRepository = Repository<Responses>;

impl Entity for Responses {
    type Record = ResponseRecord;
    type New = NewResponse;
    type Patch = ResponsePatch;

    const TABLE: &'static str = "responses";
    const COLUMNS: &'static [&'static str] = &["cause", "solution", "error_id"];

    fn insert_values(new: NewResponse) -> Vec<Value> {
        vec![
            Value::Text(new.cause),
            Value::Text(new.solution),
            Value::Integer(new.error_id),
        ]
    }

    fn patch_values(patch: ResponsePatch) -> Vec<(&'static str, Value)> {
        let mut values = Vec::new();
        if let Some(cause) = patch.cause {
            values.push(("cause", Value::Text(cause)));
        }
        if let Some(solution) = patch.solution {
            values.push(("solution", Value::Text(solution)));
        }
        if let Some(error_id) = patch.error_id {
            values.push(("error_id", Value::Integer(error_id)));
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Database;

    fn rotate_logs(error_id: i64) -> NewResponse {
        NewResponse {
            cause: Some("log overflow".to_string()),
            solution: Some("rotate logs".to_string()),
            error_id: Some(error_id),
        }
    }

    #[test]
    fn test_patch_values_keep_column_order() {
        let patch = ResponsePatch {
            error_id: Some(Some(7)),
            cause: Some(Some("fan".to_string())),
            solution: None,
        };

        assert_eq!(
            Responses::patch_values(patch),
            vec![
                ("cause", Value::Text(Some("fan".to_string()))),
                ("error_id", Value::Integer(Some(7))),
            ]
        );
    }

    #[tokio::test]
    async fn test_response_crud_round() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.responses();

        let created = repo.create(rotate_logs(1)).await.unwrap();
        assert_eq!(created.cause, "log overflow");
        assert_eq!(created.error_id, 1);
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), Some(created.clone()));

        let patch = ResponsePatch {
            solution: Some(Some("add disk".to_string())),
            ..Default::default()
        };
        let updated = repo.update_by_id(created.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.solution, "add disk");
        assert_eq!(updated.cause, created.cause);
        assert_eq!(updated.error_id, created.error_id);

        assert_eq!(repo.delete_by_id(created.id).await.unwrap(), Some(updated));
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_response_may_reference_missing_error() {
        let db = Database::in_memory().await.unwrap();

        let orphan = db.responses().create(rotate_logs(999)).await.unwrap();

        assert_eq!(orphan.error_id, 999);
        assert_eq!(db.responses().list().await.unwrap(), vec![orphan]);
    }

    #[tokio::test]
    async fn test_create_without_error_id_is_rejected() {
        let db = Database::in_memory().await.unwrap();

        let result = db
            .responses()
            .create(NewResponse {
                error_id: None,
                ..rotate_logs(1)
            })
            .await;

        assert!(result.is_err());
    }
}
