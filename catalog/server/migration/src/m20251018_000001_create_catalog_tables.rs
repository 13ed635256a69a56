use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    FirstName,
    SecondName,
    Email,
    Password,
}

#[derive(DeriveIden)]
enum Goods {
    Table,
    Id,
    Title,
    Description,
    Price,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    UserId,
    GoodsId,
    Date,
    Status,
}

const FK_ORDERS_TO_USERS: &str = "fk-orders-user_id";
const FK_ORDERS_TO_GOODS: &str = "fk-orders-goods_id";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::FirstName, 32))
                    .col(string_len(Users::SecondName, 32))
                    .col(string_len(Users::Email, 128))
                    .col(string_len(Users::Password, 128))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Goods::Table)
                    .if_not_exists()
                    .col(pk_auto(Goods::Id))
                    .col(string_len(Goods::Title, 32))
                    .col(string_len(Goods::Description, 256))
                    .col(double(Goods::Price))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk_auto(Orders::Id))
                    .col(integer(Orders::UserId))
                    .col(integer(Orders::GoodsId))
                    .col(timestamp_with_time_zone(Orders::Date))
                    .col(boolean(Orders::Status))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ORDERS_TO_USERS)
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ORDERS_TO_GOODS)
                            .from(Orders::Table, Orders::GoodsId)
                            .to(Goods::Table, Goods::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Goods::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await
    }
}
