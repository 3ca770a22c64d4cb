//! # POS Commands
//!
//! One function per screen action.
//!
//! ## Command Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Command Map                                      │
//! │                                                                         │
//! │  Billing screen          cart::add_to_cart / remove / clear / get      │
//! │                          sale::finalize_sale                            │
//! │                          receipt::receipt_preview                       │
//! │                                                                         │
//! │  History screen          sale::list_sales / get_sale                    │
//! │                          receipt::receipt_for_sale / export / print     │
//! │                                                                         │
//! │  Catalog screen          product::create / update / delete / search     │
//! │                                                                         │
//! │  Users screen (admin)    user::create / update / delete / password      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take their dependencies (`Database`, `CartState`, `Session`)
//! as explicit arguments and return `Result<T, PosError>`.

pub mod cart;
pub mod product;
pub mod receipt;
pub mod sale;
pub mod user;
