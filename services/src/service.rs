use std::future::Future;
use std::pin::Pin;

use db::repositories::repository::Repository;
use sea_orm::{ActiveModelTrait, EntityTrait, PrimaryKeyTrait};

use crate::ServiceError;

pub trait ToActiveModel<E>
where
    E: EntityTrait,
{
    fn into_active_model(self) -> Result<<E as EntityTrait>::ActiveModel, ServiceError>;
}

/// Thin CRUD facade over a [`Repository`] that maps store errors into
/// [`ServiceError`]. Business rules specific to a module (auth, ingestion,
/// batch) live beside the repository call, not inside this trait.
pub trait Service<'a, E, C, U, F, R>: Send + Sync
where
    E: EntityTrait,
    C: Send + 'static + ToActiveModel<E>,
    U: Send + 'static + ToActiveModel<E>,
    F: Send + Sync + 'static,
    R: Repository<E, F> + 'a,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send,
    E::Model: Send + Sync + sea_orm::IntoActiveModel<E::ActiveModel>,
{
    fn repository(&'a self) -> &'a R;

    fn create(
        &'a self,
        params: C,
    ) -> Pin<Box<dyn Future<Output = Result<E::Model, ServiceError>> + Send + 'a>> {
        let repo = self.repository();
        Box::pin(async move {
            let active_model = params.into_active_model()?;
            Ok(repo.create(active_model).await?)
        })
    }

    fn update(
        &'a self,
        params: U,
    ) -> Pin<Box<dyn Future<Output = Result<E::Model, ServiceError>> + Send + 'a>> {
        let repo = self.repository();
        Box::pin(async move {
            let active_model = params.into_active_model()?;
            Ok(repo.update(active_model).await?)
        })
    }

    fn delete(
        &'a self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Pin<Box<dyn Future<Output = Result<(), ServiceError>> + Send + 'a>> {
        let repo = self.repository();
        Box::pin(async move { Ok(repo.delete(id).await?) })
    }

    fn find_by_id(
        &'a self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Pin<Box<dyn Future<Output = Result<Option<E::Model>, ServiceError>> + Send + 'a>> {
        let repo = self.repository();
        Box::pin(async move { Ok(repo.find_by_id(id).await?) })
    }

    fn find_one(
        &'a self,
        filter_params: F,
    ) -> Pin<Box<dyn Future<Output = Result<Option<E::Model>, ServiceError>> + Send + 'a>> {
        let repo = self.repository();
        Box::pin(async move { Ok(repo.find_one(filter_params).await?) })
    }

    fn find_all(
        &'a self,
        filter_params: F,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<E::Model>, ServiceError>> + Send + 'a>> {
        let repo = self.repository();
        Box::pin(async move { Ok(repo.find_all(filter_params).await?) })
    }

    fn filter(
        &'a self,
        filter_params: F,
        page: u64,
        per_page: u64,
        sort_by: Option<String>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<E::Model>, ServiceError>> + Send + 'a>> {
        let repo = self.repository();
        Box::pin(async move { Ok(repo.filter(filter_params, page, per_page, sort_by).await?) })
    }

    fn count(
        &'a self,
        filter_params: F,
    ) -> Pin<Box<dyn Future<Output = Result<u64, ServiceError>> + Send + 'a>> {
        let repo = self.repository();
        Box::pin(async move { Ok(repo.count(filter_params).await?) })
    }
}
