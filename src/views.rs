pub mod explorer_view;
