//! Order entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use bookshop_core::domain::OrderStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Status {
    #[sea_orm(string_value = "placed")]
    Placed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl From<Status> for OrderStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Placed => OrderStatus::Placed,
            Status::Cancelled => OrderStatus::Cancelled,
        }
    }
}

impl From<OrderStatus> for Status {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Placed => Status::Placed,
            OrderStatus::Cancelled => Status::Cancelled,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub book_id: Uuid,
    pub total: i64,
    pub currency: String,
    pub status: Status,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Book,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for bookshop_core::domain::Order {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            book_id: model.book_id,
            total: model.total,
            currency: model.currency,
            status: model.status.into(),
            created_at: model.created_at.into(),
        }
    }
}

impl From<bookshop_core::domain::Order> for ActiveModel {
    fn from(order: bookshop_core::domain::Order) -> Self {
        Self {
            id: Set(order.id),
            account_id: Set(order.account_id),
            book_id: Set(order.book_id),
            total: Set(order.total),
            currency: Set(order.currency),
            status: Set(order.status.into()),
            created_at: Set(order.created_at.into()),
        }
    }
}
