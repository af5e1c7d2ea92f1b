pub mod banking;
pub mod geography;
pub mod hotel;
pub mod reservation;
pub mod user;

pub use banking::{format_amount, Account, AccountRequest, Transfer, TransferRequest};
pub use geography::{City, CityRequest, Province, ProvinceRequest, Region, RegionRequest};
pub use hotel::{
    Category, CategoryRequest, Hotel, HotelRequest, Room, RoomRequest, RoomType, RoomTypeRequest,
};
pub use reservation::{Reservation, ReservationRequest, ReservationStatus};
pub use user::{Role, RoleRequest, User, UserRequest};
