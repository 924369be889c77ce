pub mod a001_order;
pub mod a002_rating;
pub mod a003_review;
pub mod a004_love;
pub mod a005_donation;
pub mod a006_contact_submission;
pub mod a007_site_analytics;
