pub mod card_mapper;
