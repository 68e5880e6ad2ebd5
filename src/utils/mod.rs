pub mod distance;
pub mod graph_loader;
pub mod gravity;
pub mod ingest;
pub mod road_network;
pub mod seeding;
