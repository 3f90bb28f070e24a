//! Diesel schema for directory persistence.

diesel::table! {
    /// User records keyed by chat-platform identity.
    users (id) {
        /// Chat-platform user identifier.
        id -> Int8,
        /// Live username handle, if any.
        #[max_length = 255]
        username -> Nullable<Varchar>,
        /// First name, if any.
        #[max_length = 255]
        first_name -> Nullable<Varchar>,
        /// Last name, if any.
        #[max_length = 255]
        last_name -> Nullable<Varchar>,
        /// Workflow role.
        #[max_length = 50]
        role -> Varchar,
        /// Accumulated approval points.
        points -> Int8,
        /// Reserved balance in integer cents.
        balance_cents -> Int8,
    }
}

diesel::table! {
    /// Chat group records.
    chat_groups (chat_id) {
        /// Chat identifier.
        chat_id -> Int8,
        /// Chat title at last interaction.
        #[max_length = 255]
        title -> Varchar,
    }
}

diesel::table! {
    /// Key-value settings.
    settings (key) {
        /// Setting key.
        #[max_length = 255]
        key -> Varchar,
        /// Setting value.
        value -> Text,
    }
}
