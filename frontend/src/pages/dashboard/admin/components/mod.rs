pub mod invitation_list;
pub mod invite_form;
