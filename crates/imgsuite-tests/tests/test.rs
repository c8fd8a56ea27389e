mod configure;
mod provision;
mod register;
