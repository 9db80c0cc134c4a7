pub mod party_controller;
