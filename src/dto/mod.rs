pub mod parking_dto;
