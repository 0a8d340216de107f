//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; regenerate with
//! `diesel print-schema` after changing them.

diesel::table! {
    /// Registered accounts and their points balances.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 64]
        name -> Varchar,
        /// Unique login email, stored lowercased.
        #[max_length = 254]
        email -> Varchar,
        /// Contact phone number.
        #[max_length = 32]
        phone -> Varchar,
        /// Argon2id PHC credential string.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Points balance; guarded by a `points >= 0` check constraint.
        points -> Int8,
        /// Account role: `user` or `admin`.
        #[max_length = 16]
        role -> Varchar,
        /// Account creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Waste category catalogue.
    waste_types (id) {
        /// Slug identifier, e.g. `bottles`.
        #[max_length = 32]
        id -> Varchar,
        /// Human-readable name.
        #[max_length = 64]
        name -> Varchar,
        /// Points awarded per kilogram.
        points_per_kg -> Int8,
        /// Whether the type accepts new deposits.
        is_active -> Bool,
    }
}

diesel::table! {
    /// Reward option catalogue.
    reward_options (id) {
        /// Slug identifier, e.g. `gopay`.
        #[max_length = 32]
        id -> Varchar,
        /// Human-readable name.
        #[max_length = 64]
        name -> Varchar,
        /// Balance threshold required to redeem via this option.
        min_points_to_redeem -> Int8,
        /// Displayed conversion reference.
        rate -> Int8,
        /// Whether the option accepts new redemptions.
        is_active -> Bool,
    }
}

diesel::table! {
    /// Waste deposits and their review lifecycle.
    deposits (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning account.
        user_id -> Uuid,
        /// Waste type the deposit was submitted against.
        #[max_length = 32]
        waste_type_id -> Varchar,
        /// Measured weight in kilograms.
        weight_kg -> Float8,
        /// Points fixed at creation time.
        points_awarded -> Int8,
        /// Lifecycle state: `pending`, `approved`, or `rejected`.
        #[max_length = 16]
        status -> Varchar,
        /// Opaque photo reference.
        photo_ref -> Text,
        /// Reviewing admin, once resolved.
        admin_id -> Nullable<Uuid>,
        /// Review notes or rejection reason.
        admin_notes -> Nullable<Text>,
        /// Resolution timestamp.
        processed_at -> Nullable<Timestamptz>,
        /// Submission timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Redemption requests and their resolution lifecycle.
    redemptions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning account.
        user_id -> Uuid,
        /// Reward option the payout targets.
        #[max_length = 32]
        reward_option_id -> Varchar,
        /// Requested payout in whole IDR.
        idr_amount -> Int8,
        /// Points reserved at request time.
        points_used -> Int8,
        /// Lifecycle state: `pending`, `completed`, or `failed`.
        #[max_length = 16]
        status -> Varchar,
        /// Recipient wallet contact details.
        #[max_length = 255]
        wallet_info -> Varchar,
        /// Resolving admin, once resolved.
        admin_id -> Nullable<Uuid>,
        /// Resolution notes or failure reason.
        admin_notes -> Nullable<Text>,
        /// Resolution timestamp.
        processed_at -> Nullable<Timestamptz>,
        /// Request timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    users,
    waste_types,
    reward_options,
    deposits,
    redemptions,
);
