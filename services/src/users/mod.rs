pub mod register;

pub use register::{
    delete_users, list_users, register_user, register_users_from_sheet, NewUser,
    SheetRowOutcome,
};
