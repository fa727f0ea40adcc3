pub mod team_role;
