#[cfg(test)]
mod tests {
    use crate::database::entity::{comment, post, user};
    use crate::database::postgres_repo::{
        PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
    };
    use quill_core::domain::{Comment, Post, User};
    use quill_core::error::RepoError;
    use quill_core::ports::{CommentRepository, PostRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        // Mock the query expectation
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                author_id,
                title: "Test Post".to_owned(),
                content: "Content".to_owned(),
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
    }

    #[tokio::test]
    async fn test_find_user_by_username() {
        let user_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                username: "demo".to_owned(),
                email: "demo@example.com".to_owned(),
                password_hash: "hash".to_owned(),
                is_active: true,
                is_staff: false,
                date_joined: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let result: Option<User> = repo.find_by_username("demo").await.unwrap();

        let user = result.unwrap();
        assert_eq!(user.username, "demo");
        assert!(user.is_active);
        assert!(!user.is_staff);
    }

    #[tokio::test]
    async fn test_list_comments_for_post_in_creation_order() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let first = chrono::Utc::now();
        let second = first + chrono::TimeDelta::seconds(30);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                comment::Model {
                    id: uuid::Uuid::new_v4(),
                    post_id,
                    author_id,
                    content: "first".to_owned(),
                    created_at: first.into(),
                },
                comment::Model {
                    id: uuid::Uuid::new_v4(),
                    post_id,
                    author_id,
                    content: "second".to_owned(),
                    created_at: second.into(),
                },
            ]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let comments: Vec<Comment> = repo.list_for_post(post_id).await.unwrap();

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].content, "first");
        assert_eq!(comments[1].content, "second");
    }

    #[tokio::test]
    async fn test_delete_missing_comment_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let result = repo.delete(uuid::Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_post_removes_comments_first() {
        // Two exec results inside the transaction: the comment sweep, then
        // the post row itself.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 3,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(repo.delete(uuid::Uuid::new_v4()).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.delete(uuid::Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
