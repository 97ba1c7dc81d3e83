//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbConn, DbErr, EntityTrait,
    Paginator, PaginatorTrait, QueryFilter, QueryOrder, SelectorTrait, TransactionTrait,
};
use uuid::Uuid;

use quill_core::domain::{Comment, Page, Post, Profile, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    COMMENT_PAGE_SIZE, CommentFilter, CommentRepository, POST_PAGE_SIZE, PostFilter,
    PostRepository, ProfileRepository, USER_PAGE_SIZE, UserRepository,
};

use super::entity::{comment, post, profile, user};

fn query_err(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// Map a write error, promoting unique-index violations to `Constraint`.
fn save_err(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

/// Build a `%...%` LIKE pattern with the wildcard characters escaped.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Run a paginated query, clamping the 1-based `requested` page into range.
async fn fetch_page_clamped<'db, C, S, T>(
    paginator: Paginator<'db, C, S>,
    page_size: u64,
    requested: u64,
) -> Result<Page<T>, RepoError>
where
    C: ConnectionTrait,
    S: SelectorTrait + 'db,
    T: From<S::Item>,
{
    let totals = paginator.num_items_and_pages().await.map_err(query_err)?;

    if totals.number_of_items == 0 {
        return Ok(Page::empty(page_size));
    }

    let page = requested.max(1).min(totals.number_of_pages);
    // Paginator pages are 0-based.
    let items = paginator.fetch_page(page - 1).await.map_err(query_err)?;

    Ok(Page {
        items: items.into_iter().map(Into::into).collect(),
        page,
        page_size,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = match email.find('@') {
            Some(at_pos) => {
                let (local, domain) = email.split_at(at_pos);
                if local.len() > 1 {
                    format!("{}***{}", &local[..1], domain)
                } else {
                    format!("***{domain}")
                }
            }
            None => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, entity: User) -> Result<User, RepoError> {
        let active_model: user::ActiveModel = entity.into();
        let model = active_model.insert(&self.db).await.map_err(save_err)?;
        Ok(model.into())
    }

    async fn update(&self, entity: User) -> Result<User, RepoError> {
        let active_model: user::ActiveModel = entity.into();
        let model = active_model.update(&self.db).await.map_err(save_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn search(&self, query: Option<&str>, page: u64) -> Result<Page<User>, RepoError> {
        let mut select = user::Entity::find().order_by_desc(user::Column::DateJoined);

        if let Some(q) = query.filter(|q| !q.trim().is_empty()) {
            let pattern = like_pattern(q.trim());
            select = select.filter(
                Condition::any()
                    .add(Expr::col(user::Column::Username).ilike(pattern.as_str()))
                    .add(Expr::col(user::Column::Email).ilike(pattern.as_str())),
            );
        }

        fetch_page_clamped(select.paginate(&self.db, USER_PAGE_SIZE), USER_PAGE_SIZE, page).await
    }

    async fn count(&self) -> Result<u64, RepoError> {
        user::Entity::find().count(&self.db).await.map_err(query_err)
    }
}

/// PostgreSQL profile repository.
pub struct PostgresProfileRepository {
    db: DbConn,
}

impl PostgresProfileRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, RepoError> {
        let result = profile::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, entity: Profile) -> Result<Profile, RepoError> {
        let active_model: profile::ActiveModel = entity.into();
        let model = active_model.insert(&self.db).await.map_err(save_err)?;
        Ok(model.into())
    }

    async fn update(&self, entity: Profile) -> Result<Profile, RepoError> {
        let active_model: profile::ActiveModel = entity.into();
        let model = active_model.update(&self.db).await.map_err(save_err)?;
        Ok(model.into())
    }
}

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = entity.into();
        let model = active_model.insert(&self.db).await.map_err(save_err)?;
        Ok(model.into())
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = entity.into();
        let model = active_model.update(&self.db).await.map_err(save_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        // Comments go with their post. The schema FK also cascades; doing it
        // here keeps the contract independent of the backend.
        let txn = self.db.begin().await.map_err(query_err)?;

        comment::Entity::delete_many()
            .filter(comment::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(query_err)?;

        let result = post::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(query_err)?;
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(query_err)?;
        tracing::debug!(post_id = %id, "Deleted post and its comments");

        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let result = post::Entity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = post::Entity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn search(&self, filter: &PostFilter, page: u64) -> Result<Page<Post>, RepoError> {
        let mut select = post::Entity::find().order_by_desc(post::Column::CreatedAt);

        if let Some(q) = filter.search.as_deref().filter(|q| !q.trim().is_empty()) {
            let pattern = like_pattern(q.trim());
            select = select.filter(
                Condition::any()
                    .add(Expr::col(post::Column::Title).ilike(pattern.as_str()))
                    .add(Expr::col(post::Column::Content).ilike(pattern.as_str())),
            );
        }
        if let Some(author_id) = filter.author_id {
            select = select.filter(post::Column::AuthorId.eq(author_id));
        }

        fetch_page_clamped(select.paginate(&self.db, POST_PAGE_SIZE), POST_PAGE_SIZE, page).await
    }

    async fn count(&self) -> Result<u64, RepoError> {
        post::Entity::find().count(&self.db).await.map_err(query_err)
    }
}

/// PostgreSQL comment repository.
pub struct PostgresCommentRepository {
    db: DbConn,
}

impl PostgresCommentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let result = comment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, entity: Comment) -> Result<Comment, RepoError> {
        let active_model: comment::ActiveModel = entity.into();
        let model = active_model.insert(&self.db).await.map_err(save_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = comment::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = comment::Entity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn search(&self, filter: &CommentFilter, page: u64) -> Result<Page<Comment>, RepoError> {
        let mut select = comment::Entity::find().order_by_desc(comment::Column::CreatedAt);

        if let Some(q) = filter.search.as_deref().filter(|q| !q.trim().is_empty()) {
            let pattern = like_pattern(q.trim());
            select = select.filter(Expr::col(comment::Column::Content).ilike(pattern.as_str()));
        }
        if let Some(author_id) = filter.author_id {
            select = select.filter(comment::Column::AuthorId.eq(author_id));
        }
        if let Some(post_id) = filter.post_id {
            select = select.filter(comment::Column::PostId.eq(post_id));
        }

        fetch_page_clamped(
            select.paginate(&self.db, COMMENT_PAGE_SIZE),
            COMMENT_PAGE_SIZE,
            page,
        )
        .await
    }

    async fn count(&self) -> Result<u64, RepoError> {
        comment::Entity::find()
            .count(&self.db)
            .await
            .map_err(query_err)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::like_pattern;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("demo"), "%demo%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }
}
