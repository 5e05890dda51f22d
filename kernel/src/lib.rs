pub use crate::error::*;

mod auth;
mod catalogue;
mod command;
mod dashboard;
mod eligibility;
mod entity;
mod error;
mod event;
mod modify;
mod policy;
mod query;

#[cfg(feature = "prelude")]
pub mod prelude {
    pub mod entity {
        pub use crate::entity::*;
    }
    pub mod policy {
        pub use crate::policy::*;
    }
    pub mod catalogue {
        pub use crate::catalogue::*;
    }
    pub mod dashboard {
        pub use crate::dashboard::*;
    }
    pub mod eligibility {
        pub use crate::eligibility::*;
    }
}

#[cfg(feature = "interface")]
pub mod interface {
    pub mod auth {
        pub use crate::auth::*;
    }
    pub mod command {
        pub use crate::command::*;
    }
    pub mod event {
        pub use crate::event::*;
    }
    pub mod query {
        pub use crate::query::*;
    }
    pub mod update {
        pub use crate::modify::*;
    }
}
