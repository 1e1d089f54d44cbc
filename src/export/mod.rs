/// Excel rendering of repair reports
pub mod excel;
