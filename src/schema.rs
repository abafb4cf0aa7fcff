// Mirrors the DDL in migrations/m0001_initial.rs. Keep the two in sync.

diesel::table! {
    users (id) {
        id -> BigInt,
        name -> Text,
        preferences -> Nullable<Text>,
    }
}

diesel::table! {
    events (id) {
        id -> BigInt,
        title -> Text,
        location -> Nullable<Text>,
        date -> Nullable<Text>,
    }
}

diesel::table! {
    external_events (id) {
        id -> BigInt,
        title -> Text,
        location -> Nullable<Text>,
        date -> Nullable<Text>,
        time -> Nullable<Text>,
        description -> Nullable<Text>,
        source_url -> Nullable<Text>,
        scraped_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    api_data (id) {
        id -> BigInt,
        location_name -> Text,
        country -> Nullable<Text>,
        region -> Nullable<Text>,
        lat -> Nullable<Text>,
        lon -> Nullable<Text>,
        timezone_id -> Nullable<Text>,
        localtime -> Nullable<Text>,
        temperature -> Nullable<BigInt>,
        weather_code -> Nullable<BigInt>,
        weather_icons -> Nullable<Text>,
        weather_descriptions -> Nullable<Text>,
        wind_speed -> Nullable<BigInt>,
        wind_degree -> Nullable<BigInt>,
        wind_dir -> Nullable<Text>,
        pressure -> Nullable<BigInt>,
        precip -> Nullable<BigInt>,
        humidity -> Nullable<BigInt>,
        cloudcover -> Nullable<BigInt>,
        feelslike -> Nullable<BigInt>,
        uv_index -> Nullable<BigInt>,
        visibility -> Nullable<BigInt>,
        observation_time -> Nullable<Text>,
        fetched_at -> Nullable<Timestamp>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(api_data, events, external_events, users,);
