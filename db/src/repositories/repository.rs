use std::future::Future;
use std::pin::Pin;

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PrimaryKeyTrait, Select,
};

/// Shared CRUD surface over a sea-orm entity, parameterized by a typed
/// filter struct `F` instead of a stringly-typed query param bag.
/// Implementors only need to supply `db`, `apply_filter`, and
/// `apply_sorting`; everything else has a default built on top of them.
pub trait Repository<E, F>: Send + Sync
where
    E: EntityTrait,
    E::Model: Sync + Send + 'static,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send,
    F: Send + Sync + 'static,
    E::Model: sea_orm::IntoActiveModel<E::ActiveModel>,
{
    fn db(&self) -> &DatabaseConnection;

    fn apply_filter(query: Select<E>, filter: &F) -> Select<E>;

    fn apply_sorting(query: Select<E>, sort_by: Option<String>) -> Select<E>;

    fn create(
        &self,
        active_model: E::ActiveModel,
    ) -> Pin<Box<dyn Future<Output = Result<E::Model, DbErr>> + Send>> {
        let db = self.db().clone();
        Box::pin(async move { active_model.insert(&db).await })
    }

    fn update(
        &self,
        active_model: E::ActiveModel,
    ) -> Pin<Box<dyn Future<Output = Result<E::Model, DbErr>> + Send>> {
        let db = self.db().clone();
        Box::pin(async move { active_model.update(&db).await })
    }

    fn delete(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Pin<Box<dyn Future<Output = Result<(), DbErr>> + Send>> {
        let db = self.db().clone();
        Box::pin(async move {
            E::delete_by_id(id).exec(&db).await?;
            Ok(())
        })
    }

    fn find_by_id(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Pin<Box<dyn Future<Output = Result<Option<E::Model>, DbErr>> + Send>> {
        let db = self.db().clone();
        Box::pin(async move { E::find_by_id(id).one(&db).await })
    }

    fn find_one(
        &self,
        filter_params: F,
    ) -> Pin<Box<dyn Future<Output = Result<Option<E::Model>, DbErr>> + Send>> {
        let db = self.db().clone();
        Box::pin(async move { Self::apply_filter(E::find(), &filter_params).one(&db).await })
    }

    fn find_all(
        &self,
        filter_params: F,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<E::Model>, DbErr>> + Send>> {
        let db = self.db().clone();
        Box::pin(async move { Self::apply_filter(E::find(), &filter_params).all(&db).await })
    }

    fn filter(
        &self,
        filter_params: F,
        page: u64,
        per_page: u64,
        sort_by: Option<String>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<E::Model>, DbErr>> + Send>> {
        let db = self.db().clone();
        Box::pin(async move {
            let query = Self::apply_filter(E::find(), &filter_params);
            let query = Self::apply_sorting(query, sort_by);
            let page_index = page.saturating_sub(1);
            let paginator =
                <Select<E> as sea_orm::PaginatorTrait<'_, _>>::paginate(query, &db, per_page);
            paginator.fetch_page(page_index).await
        })
    }

    fn count(
        &self,
        filter_params: F,
    ) -> Pin<Box<dyn Future<Output = Result<u64, DbErr>> + Send>> {
        let db = self.db().clone();
        Box::pin(async move {
            let query = Self::apply_filter(E::find(), &filter_params);
            <Select<E> as sea_orm::PaginatorTrait<'_, _>>::count(query, &db).await
        })
    }

    fn exists(
        &self,
        filter_params: F,
    ) -> Pin<Box<dyn Future<Output = Result<bool, DbErr>> + Send>> {
        let db = self.db().clone();
        Box::pin(async move {
            let query = Self::apply_filter(E::find(), &filter_params);
            let count = <Select<E> as sea_orm::PaginatorTrait<'_, _>>::count(query, &db).await?;
            Ok(count > 0)
        })
    }
}
