pub mod parking_controller;
