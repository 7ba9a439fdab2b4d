#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::database::entity::{post, subphez_moderator, vote};
    use crate::database::postgres_repo::{
        PostgresCommunityService, PostgresPostRepository, PostgresVoteLedger,
    };
    use phez_core::domain::{PageRequest, Post, PostOrder, Subphez, User, VoteFilter};
    use phez_core::ports::{BaseRepository, CommunityService, PostRepository, VoteLedger};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    fn post_model(id: uuid::Uuid, title: &str) -> post::Model {
        post::Model {
            id,
            title: title.to_owned(),
            body: Some("Body".to_owned()),
            url: None,
            is_self: true,
            guid: title.to_lowercase().replace(' ', "-"),
            user_id: uuid::Uuid::new_v4(),
            subphez_id: uuid::Uuid::new_v4(),
            points: 1,
            hot_score: 0.0,
            created_at: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(post_id, "Test Post")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.expect("post should be found");
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.guid, "test-post");
        assert_eq!(post.id, post_id);
    }

    #[tokio::test]
    async fn test_list_pages_posts() {
        let count_row = BTreeMap::from([("num_items", Value::BigInt(Some(21)))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row]])
            .append_query_results(vec![vec![post_model(uuid::Uuid::new_v4(), "Last One")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let page = repo.list(PostOrder::Points, PageRequest::new(2)).await.unwrap();

        assert_eq!(page.total, 21);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Last One");
    }

    #[tokio::test]
    async fn test_vote_sum_defaults_to_zero() {
        let empty_sum = BTreeMap::from([("total", Value::BigInt(None))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![empty_sum]])
            .into_connection();

        let ledger = PostgresVoteLedger::new(db);
        let total = ledger.sum(uuid::Uuid::new_v4(), VoteFilter::Negative).await.unwrap();

        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_cast_vote_in_transaction() {
        let post_id = uuid::Uuid::new_v4();
        let user_id = uuid::Uuid::new_v4();
        let vote_row = vote::Model {
            id: uuid::Uuid::new_v4(),
            post_id,
            user_id,
            vote_value: -1,
            created_at: chrono::Utc::now().into(),
        };
        let sum_row = BTreeMap::from([("total", Value::BigInt(Some(4)))]);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![vote_row]])
            .append_query_results(vec![vec![sum_row]])
            .append_exec_results(vec![
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let ledger = PostgresVoteLedger::new(db);
        let vote = ledger.cast(user_id, post_id, -1).await.unwrap();

        assert_eq!(vote.post_id, post_id);
        assert_eq!(vote.vote_value, -1);
    }

    #[tokio::test]
    async fn test_can_moderate_when_assigned() {
        let subphez = Subphez::new("Rust", "rust");
        let user = User::new("mod");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![subphez_moderator::Model {
                subphez_id: subphez.id,
                user_id: user.id,
            }]])
            .append_query_results(vec![Vec::<subphez_moderator::Model>::new()])
            .into_connection();

        let communities = PostgresCommunityService::new(db);

        assert!(communities.can_moderate(&subphez, &user).await.unwrap());
        assert!(!communities.can_moderate(&subphez, &User::new("someone")).await.unwrap());
    }

    #[test]
    fn test_post_text_columns_are_unbounded() {
        use sea_orm::{ColumnTrait, ColumnType};

        for column in [
            post::Column::Title,
            post::Column::Guid,
            post::Column::Body,
            post::Column::Url,
        ] {
            assert_eq!(column.def().get_column_type(), &ColumnType::Text);
        }
    }
}
