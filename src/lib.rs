pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod app_store_verify_receipt_datasource;
        pub(crate) mod google_play_developer_api_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod app_store_verify_receipt {
            pub(crate) mod verify_receipt_request_model;
            pub(crate) mod verify_receipt_response_model;
        }
        pub(crate) mod google_play_developer_api {
            pub(crate) mod product_purchase_model;
        }
        pub(crate) mod raw;
    }
    pub(crate) mod repositories {
        pub(crate) mod purchase_verification_repository_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod platform;
        pub mod purchase_verification_request;
        pub mod purchase_verification_result;
    }
    pub mod repositories {
        pub mod purchase_verification_repository;
    }
}

mod constants;
pub mod errors;
pub mod secrets;
pub mod server;
pub mod util;

#[cfg(test)]
mod test_utils;
